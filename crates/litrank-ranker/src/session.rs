//! Event loop glue between the pure state and a presentation layer.

use chrono::NaiveDate;
use litrank_common::Result;
use tracing::instrument;

use crate::filter::{DateRange, TimePreset};
use crate::sorter::SortField;
use crate::state::{RankerState, View};

/// A user input that changes what the table shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SetWeight { keyword: String, value: f64 },
    ClickSort(SortField),
    SetDateRange(Option<DateRange>),
    ApplyPreset { preset: TimePreset, today: NaiveDate },
}

/// Receives every freshly computed view.
pub trait ViewSubscriber {
    fn on_view(&mut self, view: &View<'_>);
}

/// Owns the current state and re-renders eagerly after every event.
pub struct Session {
    state: RankerState,
    subscribers: Vec<Box<dyn ViewSubscriber>>,
}

impl Session {
    pub fn new(state: RankerState) -> Self {
        Self { state, subscribers: Vec::new() }
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn ViewSubscriber>) {
        self.subscribers.push(subscriber);
    }

    pub fn state(&self) -> &RankerState {
        &self.state
    }

    /// Push the current view to every subscriber without changing state.
    pub fn refresh(&mut self) {
        let view = self.state.view();
        for sub in &mut self.subscribers {
            sub.on_view(&view);
        }
    }

    /// Apply one event, then notify subscribers. A rejected event leaves
    /// the state unchanged and notifies nobody.
    #[instrument(skip(self))]
    pub fn apply(&mut self, event: Event) -> Result<()> {
        let current = self.state.clone();
        self.state = match event {
            Event::SetWeight { keyword, value } => current.with_weight(&keyword, value)?,
            Event::ClickSort(field) => current.with_sort_click(field),
            Event::SetDateRange(range) => current.with_date_range(range),
            Event::ApplyPreset { preset, today } => current.with_preset(preset, today),
        };
        self.refresh();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ViewMode;
    use crate::weights::WeightMap;
    use litrank_common::Article;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<(usize, String)>>>);

    impl ViewSubscriber for Recorder {
        fn on_view(&mut self, view: &View<'_>) {
            let top = view.rows.first().map(|r| r.article.title.clone()).unwrap_or_default();
            self.0.borrow_mut().push((view.rows.len(), top));
        }
    }

    fn session() -> (Session, Rc<RefCell<Vec<(usize, String)>>>) {
        let articles = vec![
            Article { title: "a".into(), matched_keywords: "a(kw)".into(), pub_date: "2024-01-05".into(), ..Default::default() },
            Article { title: "b".into(), matched_keywords: "b(kw)".into(), pub_date: "2023-06-01".into(), ..Default::default() },
        ];
        let weights = WeightMap::from_iter([("a", 5.0), ("b", 1.0)]);
        let mut session = Session::new(RankerState::new(articles, weights, ViewMode::Aggregate));
        let log = Rc::new(RefCell::new(Vec::new()));
        session.subscribe(Box::new(Recorder(log.clone())));
        (session, log)
    }

    #[test]
    fn test_each_event_notifies() {
        let (mut s, log) = session();
        s.refresh();
        s.apply(Event::SetWeight { keyword: "b".into(), value: 9.0 }).unwrap();
        s.apply(Event::ApplyPreset {
            preset: TimePreset::LastYear,
            today: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        })
        .unwrap();
        s.apply(Event::SetDateRange(None)).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                (2, "a".to_string()),
                (2, "b".to_string()),
                (1, "b".to_string()),
                (2, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_rejected_event_keeps_state() {
        let (mut s, log) = session();
        assert!(s.apply(Event::SetWeight { keyword: "a".into(), value: f64::NAN }).is_err());
        assert!(log.borrow().is_empty());
        assert_eq!(s.state().weights().get("a"), 5.0);
    }

    #[test]
    fn test_click_sort_event() {
        let (mut s, log) = session();
        s.apply(Event::ClickSort(SortField::Score)).unwrap();
        assert_eq!(log.borrow().last().unwrap().1, "b");
    }
}
