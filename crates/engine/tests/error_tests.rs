use std::time::Duration;

use firma_engine as fe;

#[test]
fn error_messages_name_the_failure() {
    let launch = fe::EngineError::EngineLaunch {
        program: "pyhanko".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
    };
    assert_eq!(
        launch.to_string(),
        "failed to launch validation engine `pyhanko`: No such file or directory"
    );

    let timeout = fe::EngineError::EngineTimeout {
        program: "pyhanko".into(),
        timeout: Duration::from_millis(1500),
    };
    assert_eq!(timeout.to_string(), "validation engine `pyhanko` timed out after 1.5s");

    assert_eq!(fe::EngineError::Feature("openssl").to_string(), "feature not enabled: openssl");
    assert_eq!(
        fe::EngineError::Config("in-memory document too large".into()).to_string(),
        "configuration: in-memory document too large"
    );
}

#[test]
fn launch_errors_keep_their_io_source() {
    use std::error::Error as _;

    let err = fe::EngineError::EngineLaunch {
        program: "pyhanko".into(),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    };
    let source = err.source().expect("source");
    let io = source.downcast_ref::<std::io::Error>().expect("io error");
    assert_eq!(io.kind(), std::io::ErrorKind::PermissionDenied);
}

#[test]
fn io_and_json_errors_convert() {
    fn read_missing() -> Result<Vec<u8>, fe::EngineError> {
        Ok(std::fs::read("/nonexistent/firma/bundle.pem")?)
    }
    fn parse_garbage() -> Result<serde_json::Value, fe::EngineError> {
        Ok(serde_json::from_str("{not json")?)
    }

    assert!(matches!(read_missing(), Err(fe::EngineError::Io(_))));
    assert!(matches!(parse_garbage(), Err(fe::EngineError::Json(_))));
}

#[test]
fn revocation_policy_parse_error_lists_accepted_values() {
    let err = "sometimes".parse::<fe::RevocationPolicy>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid revocation policy: expected 'soft-fail', 'force-fetch' or 'disabled'"
    );
}
