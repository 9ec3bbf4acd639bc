//! Per-block language detection and translation.
//!
//! Both steps sit behind traits so the pipeline can run with other backends;
//! the defaults detect with `whatlang` and leave text untouched.

use tracing::warn;
use whatlang::Lang;

use crate::result::ContentBlock;
use crate::Result;

/// Language tag used when detection fails.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Detects the language of a piece of text.
pub trait LanguageDetector {
    /// A language tag (ISO 639-1 where possible), or `None` when undetectable.
    fn detect(&self, text: &str) -> Option<String>;
}

/// Translates text between languages.
pub trait Translator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

/// `whatlang` trigram detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        whatlang::detect(text).map(|info| iso_639_1(info.lang()))
    }
}

/// Returns text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Two-letter code for common languages, the `whatlang` three-letter code otherwise.
#[must_use]
pub fn iso_639_1(lang: Lang) -> String {
    let code = match lang {
        Lang::Eng => "en",
        Lang::Cmn => "zh",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Por => "pt",
        Lang::Rus => "ru",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        Lang::Nld => "nl",
        Lang::Swe => "sv",
        Lang::Dan => "da",
        Lang::Nob => "no",
        Lang::Fin => "fi",
        Lang::Pol => "pl",
        Lang::Ces => "cs",
        Lang::Tur => "tr",
        Lang::Ukr => "uk",
        Lang::Ell => "el",
        Lang::Heb => "he",
        Lang::Vie => "vi",
        Lang::Tha => "th",
        Lang::Ind => "id",
        Lang::Hun => "hu",
        Lang::Ron => "ro",
        other => return other.code().to_string(),
    };
    code.to_string()
}

/// Tag every block with its language and translate non-English text.
///
/// Output has the same length and order as the input; scores are carried
/// over. English and undetectable text is never sent to the translator, nor
/// is text already in `target`. A failed translation keeps the original text.
#[must_use]
pub fn normalize_blocks(
    blocks: &[ContentBlock],
    detector: &dyn LanguageDetector,
    translator: &dyn Translator,
    target: &str,
) -> Vec<ContentBlock> {
    blocks
        .iter()
        .map(|block| {
            let language = detector
                .detect(&block.text)
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());

            let skip = language == "en" || language == UNKNOWN_LANGUAGE || language == target;
            let text = if skip {
                block.text.clone()
            } else {
                translator
                    .translate(&block.text, &language, target)
                    .unwrap_or_else(|e| {
                        warn!(language = %language, error = %e, "translation failed, keeping original");
                        block.text.clone()
                    })
            };

            block.normalized(text, language)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FixedDetector(Option<&'static str>);

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[derive(Default)]
    struct RecordingTranslator {
        calls: RefCell<Vec<String>>,
    }

    impl Translator for RecordingTranslator {
        fn translate(&self, text: &str, source: &str, _target: &str) -> Result<String> {
            self.calls.borrow_mut().push(source.to_string());
            Ok(format!("[{source}] {text}"))
        }
    }

    fn blocks(texts: &[&str]) -> Vec<ContentBlock> {
        texts.iter().filter_map(|t| ContentBlock::new(t)).collect()
    }

    #[test]
    fn test_unknown_when_detection_fails() {
        let out = normalize_blocks(&blocks(&["???"]), &FixedDetector(None), &PassthroughTranslator, "en");
        assert_eq!(out[0].language.as_deref(), Some(UNKNOWN_LANGUAGE));
        assert_eq!(out[0].text, "???");
    }

    #[test]
    fn test_english_and_unknown_skip_translation() {
        let translator = RecordingTranslator::default();
        normalize_blocks(&blocks(&["a", "b"]), &FixedDetector(Some("en")), &translator, "en");
        normalize_blocks(&blocks(&["c"]), &FixedDetector(None), &translator, "en");
        assert!(translator.calls.borrow().is_empty());
    }

    #[test]
    fn test_other_languages_are_translated() {
        let translator = RecordingTranslator::default();
        let out = normalize_blocks(&blocks(&["Bonjour"]), &FixedDetector(Some("fr")), &translator, "en");
        assert_eq!(out[0].text, "[fr] Bonjour");
        assert_eq!(out[0].language.as_deref(), Some("fr"));
    }

    #[test]
    fn test_length_order_and_score_preserved() {
        let mut input = blocks(&["one", "two", "three"]);
        input[1].score = Some(0.75);

        let out = normalize_blocks(&input, &FixedDetector(Some("en")), &PassthroughTranslator, "en");

        let texts: Vec<&str> = out.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert_eq!(out[1].score, Some(0.75));
    }

    #[test]
    fn test_whatlang_detector() {
        let detector = WhatlangDetector;
        let english = "The quick brown fox jumps over the lazy dog while the farmer watches from the porch.";
        assert_eq!(detector.detect(english).as_deref(), Some("en"));

        let german = "Die Katze sitzt auf dem Dach und schaut den Vögeln zu, die im Garten singen.";
        assert_eq!(detector.detect(german).as_deref(), Some("de"));
    }
}
