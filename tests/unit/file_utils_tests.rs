/*!
 * Tests for glob compilation and file enumeration
 */

use transrc::file_utils::{compile_glob, FileManager};

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_compileGlob_withRecursiveStar_shouldMatchAnyDepth() {
    let pattern = compile_glob("**/*.cs").unwrap();
    assert!(pattern.is_match("Program.cs"));
    assert!(pattern.is_match("src/deep/Nested.cs"));
    assert!(!pattern.is_match("Program.fs"));
}

#[test]
fn test_compileGlob_withSingleStar_shouldStayInSegment() {
    let pattern = compile_glob("src/*.cs").unwrap();
    assert!(pattern.is_match("src/Program.cs"));
    assert!(!pattern.is_match("src/sub/Program.cs"));
}

#[test]
fn test_compileGlob_withQuestionMark_shouldMatchOneChar() {
    let pattern = compile_glob("file?.cs").unwrap();
    assert!(pattern.is_match("file1.cs"));
    assert!(!pattern.is_match("file10.cs"));
    assert!(!pattern.is_match("file/.cs"));
}

#[test]
fn test_compileGlob_withDirectoryPrefix_shouldAnchorMatch() {
    let pattern = compile_glob("bin/**").unwrap();
    assert!(pattern.is_match("bin/Debug/app.dll"));
    assert!(!pattern.is_match("src/bin.cs"));
}

#[test]
fn test_compileGlob_shouldEscapeRegexMetacharacters() {
    let pattern = compile_glob("a+b.cs").unwrap();
    assert!(pattern.is_match("a+b.cs"));
    assert!(!pattern.is_match("aab.cs"));
    assert!(!pattern.is_match("a+bXcs"));
}

#[test]
fn test_collectFiles_shouldHonorIncludesAndExcludes() {
    let temp = create_temp_dir().unwrap();
    let root = temp.path();

    create_test_file(root, "Program.cs", "// a\n").unwrap();
    create_test_file(root, "src/Lib.cs", "// b\n").unwrap();
    create_test_file(root, "bin/Generated.cs", "// c\n").unwrap();
    create_test_file(root, "README.md", "docs\n").unwrap();

    let files = FileManager::collect_files(
        root,
        &["**/*.cs".to_string()],
        &["bin/**".to_string()],
    )
    .unwrap();

    let names: Vec<String> = files
        .iter()
        .map(|p| {
            p.strip_prefix(root.canonicalize().unwrap())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(names, vec!["Program.cs".to_string(), "src/Lib.cs".to_string()]);
}

#[test]
fn test_collectFiles_shouldReturnStableOrder() {
    let temp = create_temp_dir().unwrap();
    let root = temp.path();

    create_test_file(root, "b.cs", "").unwrap();
    create_test_file(root, "a.cs", "").unwrap();
    create_test_file(root, "c.cs", "").unwrap();

    let first = FileManager::collect_files(root, &["**/*.cs".to_string()], &[]).unwrap();
    let second = FileManager::collect_files(root, &["**/*.cs".to_string()], &[]).unwrap();

    assert_eq!(first, second);
    let names: Vec<_> = first
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.cs", "b.cs", "c.cs"]);
}

#[test]
fn test_collectFiles_withMissingRoot_shouldError() {
    let temp = create_temp_dir().unwrap();
    let missing = temp.path().join("not-there");
    assert!(FileManager::collect_files(&missing, &["**/*.cs".to_string()], &[]).is_err());
}
