use mathtrail::logging;
use mathtrail::ErrorKind;

#[test]
fn test_logging_installs_once() {
    logging::init_logging().expect("first subscriber installs");

    let err = logging::init_logging().unwrap_err();
    assert_eq!(err.kind, ErrorKind::Config);
    assert_eq!(err.stage, "logging");
}
