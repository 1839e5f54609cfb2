use std::future::Future;
use std::time::Duration;

use wreq::Client;
use wreq_util::Emulation;

use crate::error::{self, BookingError};

const TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Longest text the TTS endpoint accepts in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

pub trait SpeechSynthesizer {
    /// Returns MP3 bytes for `text` spoken in `lang`.
    fn synthesize(
        &self,
        text: &str,
        lang: &str,
    ) -> impl Future<Output = Result<Vec<u8>, BookingError>> + Send;
}

#[derive(Debug, Clone)]
pub struct SpeechOptions {
    pub lang: String,
    pub proxy: Option<String>,
    pub timeout: u64,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            lang: "en".into(),
            proxy: None,
            timeout: 30,
        }
    }
}

pub struct GoogleTts {
    client: Client,
}

impl GoogleTts {
    pub fn new(options: &SpeechOptions) -> Result<Self, BookingError> {
        let mut builder = Client::builder()
            .emulation(Emulation::Chrome137)
            .timeout(Duration::from_secs(options.timeout));

        if let Some(ref proxy) = options.proxy {
            builder = builder.proxy(wreq::Proxy::all(proxy).map_err(error::from_http_error)?);
        }

        let client = builder.build().map_err(error::from_http_error)?;
        Ok(Self { client })
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        lang: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, BookingError> {
        let params = [
            ("ie", "UTF-8".to_string()),
            ("client", "tw-ob".to_string()),
            ("q", chunk.to_string()),
            ("tl", lang.to_string()),
            ("total", total.to_string()),
            ("idx", idx.to_string()),
            ("textlen", chunk.chars().count().to_string()),
        ];

        tracing::debug!(idx, total, lang, "requesting speech chunk");

        let response = self
            .client
            .get(TTS_URL)
            .query(&params)
            .send()
            .await
            .map_err(error::from_http_error)?;

        let status = response.status().as_u16();
        match status {
            200 => {}
            429 => return Err(BookingError::RateLimited),
            _ if status >= 400 => return Err(BookingError::HttpStatus(status)),
            _ => {}
        }

        let bytes = response.bytes().await.map_err(error::from_http_error)?;
        Ok(bytes.to_vec())
    }
}

impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, BookingError> {
        let chunks = chunk_text(text);
        let total = chunks.len();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            // MP3 frames are self-delimiting, so concatenated responses play back in order.
            audio.extend(self.fetch_chunk(chunk, lang, idx, total).await?);
        }
        Ok(audio)
    }
}

/// Splits on whitespace into pieces of at most [`MAX_CHUNK_CHARS`]
/// characters. Words longer than that are cut mid-word.
pub fn chunk_text(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > MAX_CHUNK_CHARS {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(MAX_CHUNK_CHARS);
            chunks.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current.is_empty() { word.len() } else { word.len() + 1 };
        if current_len + needed > MAX_CHUNK_CHARS {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(chunk_text("Hello Asha."), vec!["Hello Asha."]);
    }

    #[test]
    fn chunks_respect_limit_and_keep_words() {
        let text = "Hello Asha, your metro ticket from Ameerpet to KPHB for 2 passengers is \
                    confirmed, with an SUV cab from KPHB to Hotel. Total fare is 240 rupees.";
        let chunks = chunk_text(text);
        assert!(chunks.len() > 1);
        for c in &chunks {
            assert!(c.chars().count() <= MAX_CHUNK_CHARS, "{c}");
        }
        assert_eq!(chunks.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn overlong_word_is_split() {
        let word = "x".repeat(250);
        let chunks = chunk_text(&format!("hi {word}"));
        assert_eq!(chunks[0], "hi");
        assert_eq!(chunks[1].len(), 100);
        assert_eq!(chunks[2].len(), 100);
        assert_eq!(chunks[3].len(), 50);
    }

    #[test]
    fn multibyte_characters_count_once() {
        let text = "₹".repeat(100);
        let chunks = chunk_text(&text);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(chunk_text("   ").is_empty());
    }
}
