#[cfg(test)]
mod tests {
    use super::super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.reports.reports_dir, "data/weekly_reports");
        assert_eq!(config.reports.raw_dir, "data/raw");
        assert_eq!(config.view.sort, "score");
        assert_eq!(config.view.direction, "desc");
        assert!(config.scoring.weights.is_empty());
    }

    #[test]
    fn test_weights_table_parsed() {
        let config = Config::from_toml_str(
            r#"
            [scoring]
            target_keywords = ["visual analytics"]

            [scoring.weights]
            "visual analytics" = 5.0
            dashboard = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(config.scoring.weights.get("visual analytics"), Some(5.0));
        assert_eq!(config.scoring.weights.get("dashboard"), Some(2.5));
        assert_eq!(config.scoring.target_keywords, vec!["visual analytics".to_string()]);
    }

    #[test]
    fn test_out_of_range_weight_rejected() {
        let err = Config::from_toml_str("[scoring.weights]\nfoo = 11.0\n").unwrap_err();
        assert!(matches!(err, LitrankError::InvalidWeight { ref keyword, .. } if keyword == "foo"));
    }

    #[test]
    fn test_env_overrides_replace_weights() {
        let mut config = Config::from_toml_str("[scoring.weights]\nfoo = 1.0\n").unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            (WEIGHTS_ENV, r#"{"bar": 3.0}"#),
            (TARGETS_ENV, r#"["bar"]"#),
        ]);
        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert!(!config.scoring.weights.contains_key("foo"));
        assert_eq!(config.scoring.weights.get("bar"), Some(3.0));
        assert_eq!(config.scoring.target_keywords, vec!["bar".to_string()]);
    }

    #[test]
    fn test_malformed_env_ignored() {
        let mut config = Config::from_toml_str("[scoring.weights]\nfoo = 1.0\n").unwrap();
        config
            .apply_env_overrides(|k| (k == WEIGHTS_ENV).then(|| "not json".to_string()))
            .unwrap();
        assert_eq!(config.scoring.weights.get("foo"), Some(1.0));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[view]\nsort = \"journal\"\ndirection = \"asc\"").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.view.sort, "journal");
        assert_eq!(config.view.direction, "asc");
    }

    #[test]
    fn test_weights_keep_file_order() {
        let config = Config::from_toml_str(
            "[scoring.weights]\nzeta = 1.0\n\"visual analytics\" = 5.0\nalpha = 2.0\n",
        )
        .unwrap();
        assert_eq!(
            config.scoring.weights.keywords().collect::<Vec<_>>(),
            vec!["zeta", "visual analytics", "alpha"]
        );
    }

    #[test]
    fn test_out_of_range_env_weight_rejected() {
        let mut config = Config::from_toml_str("[scoring.weights]\nfoo = 1.0\n").unwrap();
        let err = config
            .apply_env_overrides(|k| (k == WEIGHTS_ENV).then(|| r#"{"foo": 2.0, "bar": 20}"#.to_string()))
            .unwrap_err();
        assert!(matches!(err, LitrankError::InvalidWeight { ref keyword, .. } if keyword == "bar"));
        assert_eq!(config.scoring.weights.get("foo"), Some(1.0));
    }

    #[test]
    fn test_invalid_file_is_an_error_not_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scoring.weights]\nva = 5.0\ndashboard = 10.5").unwrap();
        let err = Config::load_or_default_from(file.path(), |_| None).unwrap_err();
        assert!(matches!(err, LitrankError::InvalidWeight { ref keyword, .. } if keyword == "dashboard"));

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "[scoring.weights\nva = ").unwrap();
        assert!(matches!(
            Config::load_or_default_from(broken.path(), |_| None),
            Err(LitrankError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("litrank.toml");
        let config = Config::load_or_default_from(&path, |k| {
            (k == TARGETS_ENV).then(|| r#"["visual analytics"]"#.to_string())
        })
        .unwrap();
        assert!(config.scoring.weights.is_empty());
        assert_eq!(config.scoring.target_keywords, vec!["visual analytics".to_string()]);
        assert!(matches!(Config::load_from(&path, |_| None), Err(LitrankError::Config(_))));
    }
}
