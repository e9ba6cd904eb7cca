use serde::Deserialize;

const DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// One dictionary entry for a looked-up word
#[derive(Debug, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Meaning {
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
}

#[derive(Debug)]
pub enum DictionaryError {
    RequestFailed(String),
    ParseFailed(String),
    /// The word has no dictionary entry
    NotFound(String),
}

impl std::fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictionaryError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            DictionaryError::ParseFailed(msg) => write!(f, "Parse failed: {}", msg),
            DictionaryError::NotFound(word) => write!(f, "No entry for \"{}\"", word),
        }
    }
}

impl std::error::Error for DictionaryError {}

/// Look up a word in the free dictionary API. Dispatched only after the
/// selection has been resolved and captured; the result arrives as its own
/// event and never re-reads selection state.
pub fn lookup_word(word: &str) -> Result<Vec<DictionaryEntry>, DictionaryError> {
    let url = format!("{}/{}", DICTIONARY_API_URL, word);

    let response = reqwest::blocking::get(&url)
        .map_err(|e| DictionaryError::RequestFailed(e.to_string()))?;
    let body = response
        .text()
        .map_err(|e| DictionaryError::RequestFailed(e.to_string()))?;

    parse_entries(word, &body)
}

/// Parse the API response body, distinguishing a missing word from a
/// malformed payload
fn parse_entries(word: &str, body: &str) -> Result<Vec<DictionaryEntry>, DictionaryError> {
    match serde_json::from_str::<Vec<DictionaryEntry>>(body) {
        Ok(entries) => Ok(entries),
        Err(parse_err) => {
            // Unknown words come back as an object with a "title" field
            // instead of an entry array
            let is_missing = serde_json::from_str::<serde_json::Value>(body)
                .is_ok_and(|value| value.get("title").is_some());
            if is_missing {
                Err(DictionaryError::NotFound(word.to_string()))
            } else {
                Err(DictionaryError::ParseFailed(parse_err.to_string()))
            }
        }
    }
}

/// First pronunciation audio URL across the entries, if any
pub fn first_audio(entries: &[DictionaryEntry]) -> Option<&str> {
    entries
        .iter()
        .flat_map(|e| e.phonetics.iter())
        .filter_map(|p| p.audio.as_deref())
        .find(|a| !a.is_empty())
}

/// First phonetic transcription across the entries, if any
pub fn first_phonetic(entries: &[DictionaryEntry]) -> Option<&str> {
    entries
        .iter()
        .filter_map(|e| e.phonetic.as_deref())
        .chain(
            entries
                .iter()
                .flat_map(|e| e.phonetics.iter())
                .filter_map(|p| p.text.as_deref()),
        )
        .find(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[{
        "word": "run",
        "phonetic": "/ɹʌn/",
        "phonetics": [{"text": "/ɹʌn/", "audio": "https://example.org/run.mp3"}],
        "meanings": [{
            "partOfSpeech": "verb",
            "definitions": [
                {"definition": "To move swiftly.", "example": "I run every morning."},
                {"definition": "To flow, as a liquid."}
            ]
        }]
    }]"#;

    const MISSING: &str = r#"{
        "title": "No Definitions Found",
        "message": "Sorry pal, we couldn't find definitions for the word you were looking for.",
        "resolution": "You can try the search again at later time or head to the web instead."
    }"#;

    #[test]
    fn test_parse_entries() {
        let entries = parse_entries("run", SAMPLE).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "run");
        assert_eq!(entries[0].meanings[0].part_of_speech, "verb");
        assert_eq!(entries[0].meanings[0].definitions.len(), 2);
        assert_eq!(
            entries[0].meanings[0].definitions[0].example.as_deref(),
            Some("I run every morning.")
        );
    }

    #[test]
    fn test_parse_missing_word() {
        match parse_entries("qzx", MISSING) {
            Err(DictionaryError::NotFound(word)) => assert_eq!(word, "qzx"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage_is_parse_failed() {
        assert!(matches!(
            parse_entries("run", "not json"),
            Err(DictionaryError::ParseFailed(_))
        ));
    }

    #[test]
    fn test_audio_and_phonetic_helpers() {
        let entries = parse_entries("run", SAMPLE).unwrap();
        assert_eq!(first_audio(&entries), Some("https://example.org/run.mp3"));
        assert_eq!(first_phonetic(&entries), Some("/ɹʌn/"));
    }

    #[test]
    fn test_helpers_skip_empty_strings() {
        let body = r#"[{"word": "x", "phonetics": [{"text": "", "audio": ""}]}]"#;
        let entries = parse_entries("x", body).unwrap();
        assert_eq!(first_audio(&entries), None);
        assert_eq!(first_phonetic(&entries), None);
    }
}
