/*!
 * End-to-end tests of the directory translation workflow
 */

use transrc::app_config::Config;
use transrc::providers::mock::MockTranslator;
use transrc::Controller;

use crate::common::{create_temp_dir, create_test_file};

#[tokio::test]
async fn test_run_withTranslatableFiles_shouldRewriteThemInPlace() {
    let temp = create_temp_dir().unwrap();
    let root = temp.path();

    create_test_file(root, "a.cs", "// héllo\nint a;\n").unwrap();
    create_test_file(root, "b.cs", "int b; // plain ascii\n").unwrap();

    let mock = MockTranslator::working().with_mapping("héllo", "Hello");
    let controller = Controller::with_config(Config::default()).unwrap();
    let snapshot = controller
        .run_with_translator(root.to_path_buf(), Box::new(mock))
        .await
        .unwrap();

    assert_eq!(snapshot.files_processed, 2);
    assert_eq!(snapshot.files_translated, 1);
    assert_eq!(snapshot.files_failed, 0);

    let a = std::fs::read_to_string(root.join("a.cs")).unwrap();
    let b = std::fs::read_to_string(root.join("b.cs")).unwrap();
    assert_eq!(a, "// Hello\nint a;\n");
    assert_eq!(b, "int b; // plain ascii\n");
}

#[tokio::test]
async fn test_run_withFailingSecondFile_shouldIsolateTheFailure() {
    let temp = create_temp_dir().unwrap();
    let root = temp.path();

    create_test_file(root, "a.cs", "// héllo\n").unwrap();
    let b_source = "// bäd\n";
    create_test_file(root, "b.cs", b_source).unwrap();
    create_test_file(root, "c.cs", "// wörld\n").unwrap();

    let mock = MockTranslator::failing_for("bäd")
        .with_mapping("héllo", "Hello")
        .with_mapping("wörld", "World");
    let controller = Controller::with_config(Config::default()).unwrap();
    let snapshot = controller
        .run_with_translator(root.to_path_buf(), Box::new(mock))
        .await
        .unwrap();

    assert_eq!(snapshot.files_processed, 3);
    assert_eq!(snapshot.files_translated, 2);
    assert_eq!(snapshot.files_failed, 1);

    // The failed file is never partially written
    let b = std::fs::read_to_string(root.join("b.cs")).unwrap();
    assert_eq!(b, b_source);

    assert_eq!(std::fs::read_to_string(root.join("a.cs")).unwrap(), "// Hello\n");
    assert_eq!(std::fs::read_to_string(root.join("c.cs")).unwrap(), "// World\n");
}

#[tokio::test]
async fn test_run_withParseErrorFile_shouldCountFailedAndContinue() {
    let temp = create_temp_dir().unwrap();
    let root = temp.path();

    let broken_source = "/* héllo never closed\n";
    create_test_file(root, "broken.cs", broken_source).unwrap();
    create_test_file(root, "fine.cs", "// héllo\n").unwrap();

    let mock = MockTranslator::working().with_mapping("héllo", "Hello");
    let controller = Controller::with_config(Config::default()).unwrap();
    let snapshot = controller
        .run_with_translator(root.to_path_buf(), Box::new(mock))
        .await
        .unwrap();

    assert_eq!(snapshot.files_processed, 2);
    assert_eq!(snapshot.files_translated, 1);
    assert_eq!(snapshot.files_failed, 1);

    assert_eq!(std::fs::read_to_string(root.join("broken.cs")).unwrap(), broken_source);
    assert_eq!(std::fs::read_to_string(root.join("fine.cs")).unwrap(), "// Hello\n");
}

#[tokio::test]
async fn test_run_withExcludedDirectories_shouldSkipThem() {
    let temp = create_temp_dir().unwrap();
    let root = temp.path();

    create_test_file(root, "src/Main.cs", "// héllo\n").unwrap();
    create_test_file(root, "bin/Gen.cs", "// héllo\n").unwrap();
    create_test_file(root, "obj/Tmp.cs", "// héllo\n").unwrap();

    let mock = MockTranslator::working().with_mapping("héllo", "Hello");
    let controller = Controller::with_config(Config::default()).unwrap();
    let snapshot = controller
        .run_with_translator(root.to_path_buf(), Box::new(mock))
        .await
        .unwrap();

    assert_eq!(snapshot.files_processed, 1);
    assert_eq!(std::fs::read_to_string(root.join("src/Main.cs")).unwrap(), "// Hello\n");
    assert_eq!(std::fs::read_to_string(root.join("bin/Gen.cs")).unwrap(), "// héllo\n");
}

#[tokio::test]
async fn test_run_withNoMatchingFiles_shouldReportZeroCounts() {
    let temp = create_temp_dir().unwrap();
    let root = temp.path();

    create_test_file(root, "README.md", "# docs\n").unwrap();

    let controller = Controller::with_config(Config::default()).unwrap();
    let snapshot = controller
        .run_with_translator(root.to_path_buf(), Box::new(MockTranslator::working()))
        .await
        .unwrap();

    assert_eq!(snapshot.files_processed, 0);
    assert_eq!(snapshot.files_translated, 0);
    assert_eq!(snapshot.files_failed, 0);
}

#[tokio::test]
async fn test_run_twice_shouldBeIdempotent() {
    let temp = create_temp_dir().unwrap();
    let root = temp.path();

    create_test_file(root, "a.cs", "// héllo\n/* wörld */\n").unwrap();

    let controller = Controller::with_config(Config::default()).unwrap();

    let mock = MockTranslator::working()
        .with_mapping("héllo", "Hello")
        .with_mapping("wörld", "World");
    controller
        .run_with_translator(root.to_path_buf(), Box::new(mock))
        .await
        .unwrap();
    let after_first = std::fs::read_to_string(root.join("a.cs")).unwrap();

    let snapshot = controller
        .run_with_translator(root.to_path_buf(), Box::new(MockTranslator::working()))
        .await
        .unwrap();
    let after_second = std::fs::read_to_string(root.join("a.cs")).unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(snapshot.files_translated, 0);
}

#[tokio::test]
async fn test_run_withMissingDirectory_shouldError() {
    let temp = create_temp_dir().unwrap();
    let missing = temp.path().join("nope");

    let controller = Controller::with_config(Config::default()).unwrap();
    let result = controller
        .run_with_translator(missing, Box::new(MockTranslator::working()))
        .await;

    assert!(result.is_err());
}
