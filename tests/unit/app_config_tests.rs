/*!
 * Tests for app configuration functionality
 */

use transrc::app_config::{Config, TranslationProvider};

#[test]
fn test_defaultConfig_shouldTargetCSharpSources() {
    let config = Config::default();
    assert_eq!(config.target_language, "en");
    assert_eq!(config.includes, vec!["**/*.cs".to_string()]);
    assert_eq!(config.excludes, vec!["bin/**".to_string(), "obj/**".to_string()]);
    assert!(config.capitalize);
    assert!(config.translate_comments);
    assert!(config.translate_doc_comments);
    assert!(config.translate_strings);
    assert_eq!(config.translation.provider, TranslationProvider::Google);
}

#[test]
fn test_defaultConfig_shouldValidate() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_withInvalidPattern_shouldFail() {
    let mut config = Config::default();
    config.pattern = "[unclosed".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withUnknownLanguage_shouldFail() {
    let mut config = Config::default();
    config.target_language = "zz".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withRegionSubtag_shouldAccept() {
    let mut config = Config::default();
    config.target_language = "pt-BR".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withDeepLAndNoKey_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::DeepL;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withDeepLAndKey_shouldPass() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::DeepL;
    config.translation.set_api_key("secret:fx");
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withEverythingDisabled_shouldFail() {
    let mut config = Config::default();
    config.translate_comments = false;
    config.translate_doc_comments = false;
    config.translate_strings = false;
    assert!(config.validate().is_err());
}

#[test]
fn test_configJson_withPartialFields_shouldFillDefaults() {
    let json = r#"{ "target_language": "fr" }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.target_language, "fr");
    assert_eq!(config.includes, vec!["**/*.cs".to_string()]);
    assert!(config.capitalize);
}

#[test]
fn test_configJson_shouldRoundTripThroughSerde() {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.target_language, config.target_language);
    assert_eq!(parsed.translation.provider, config.translation.provider);
    assert_eq!(parsed.pattern, config.pattern);
}

#[test]
fn test_setApiKey_shouldUpdateActiveProviderEntry() {
    let mut config = Config::default();
    config.translation.set_api_key("key-123");
    assert_eq!(config.translation.get_api_key(), "key-123");
}

#[test]
fn test_scanOptions_shouldMirrorToggles() {
    let mut config = Config::default();
    config.translate_strings = false;
    config.symbols = vec!["DEBUG".to_string()];

    let options = config.scan_options();
    assert!(options.comments);
    assert!(options.doc_comments);
    assert!(!options.strings);
    assert_eq!(options.symbols, vec!["DEBUG".to_string()]);
}

#[test]
fn test_providerFromStr_shouldParseKnownNames() {
    assert_eq!("google".parse::<TranslationProvider>().unwrap(), TranslationProvider::Google);
    assert_eq!("DeepL".parse::<TranslationProvider>().unwrap(), TranslationProvider::DeepL);
    assert!("bing".parse::<TranslationProvider>().is_err());
}
