// ═══════════════════════════════════════════════════════════════════
// Error Tests: DashboardError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use finance_dashboard_core::errors::DashboardError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn network() {
        let err = DashboardError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn api_error() {
        let err = DashboardError::Api {
            endpoint: "/api/analytics".into(),
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (/api/analytics, HTTP 500): Internal Server Error"
        );
    }

    #[test]
    fn unauthenticated() {
        assert_eq!(
            DashboardError::Unauthenticated.to_string(),
            "Not authenticated — please log in"
        );
    }

    #[test]
    fn validation() {
        let err = DashboardError::ValidationError("Category is required".into());
        assert_eq!(err.to_string(), "Validation failed: Category is required");
    }

    #[test]
    fn config() {
        let err = DashboardError::Config("bad base_url".into());
        assert_eq!(err.to_string(), "Configuration error: bad base_url");
    }

    #[test]
    fn serialization_and_deserialization() {
        assert_eq!(
            DashboardError::Serialization("x".into()).to_string(),
            "Serialization error: x"
        );
        assert_eq!(
            DashboardError::Deserialization("y".into()).to_string(),
            "Deserialization error: y"
        );
    }

    #[test]
    fn file_io() {
        let err = DashboardError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

mod helpers {
    use super::*;

    #[test]
    fn is_unauthenticated_only_for_that_variant() {
        assert!(DashboardError::Unauthenticated.is_unauthenticated());
        assert!(!DashboardError::Network("x".into()).is_unauthenticated());
        assert!(!DashboardError::Api {
            endpoint: "/api/current_user".into(),
            status: 403,
            message: "Forbidden".into(),
        }
        .is_unauthenticated());
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DashboardError = io.into();
        assert!(matches!(err, DashboardError::FileIO(ref m) if m.contains("missing")));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Deserialization(_)));
    }

    #[test]
    fn from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: DashboardError = toml_err.into();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&DashboardError::Unauthenticated);
    }
}
