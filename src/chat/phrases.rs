//! Fixed user-facing strings, per locale.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The language of the fixed strings a session shows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Locale {
    /// English.
    #[default]
    English,
    /// Traditional Chinese.
    TraditionalChinese,
}

impl Locale {
    /// The phrase table for this locale.
    pub fn phrases(self) -> &'static Phrases {
        match self {
            Locale::English => &ENGLISH,
            Locale::TraditionalChinese => &TRADITIONAL_CHINESE,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "en"),
            Locale::TraditionalChinese => write!(f, "zh-TW"),
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::English),
            "zh" | "zh-tw" | "zh-hant" | "zh-hk" => Ok(Locale::TraditionalChinese),
            _ => Err(Error::validation(
                format!("unsupported locale: {s} (expected en or zh-TW)"),
                Some("locale".to_string()),
            )),
        }
    }
}

/// The fixed strings of one locale.
#[derive(Debug)]
pub struct Phrases {
    /// Shown in place of a reply that carried no usable text.
    pub invalid_response: &'static str,
    /// Shown for an assistant entry with no content at all.
    pub unrenderable: &'static str,
    /// Prefix of every failure entry.
    pub error_prefix: &'static str,
    /// Reason given for a non-2xx status.
    pub network_failed: &'static str,
    /// Prefix of the upload entry.
    pub uploaded_file: &'static str,
    /// Prefix of the file selection label.
    pub selected_file: &'static str,
    /// Notice shown while the web search indicator is visible.
    pub web_search_used: &'static str,
    /// Notice shown while a request is in flight.
    pub loading: &'static str,
}

static ENGLISH: Phrases = Phrases {
    invalid_response: "Received an invalid response format, please try again later.",
    unrenderable: "Unable to display response content",
    error_prefix: "An error occurred",
    network_failed: "Network request failed",
    uploaded_file: "📄 Uploaded file:",
    selected_file: "Selected:",
    web_search_used: "🔎 This answer used web search results",
    loading: "Thinking…",
};

static TRADITIONAL_CHINESE: Phrases = Phrases {
    invalid_response: "收到無效的回應格式，請稍後再試。",
    unrenderable: "無法顯示回應內容",
    error_prefix: "發生錯誤",
    network_failed: "網絡請求失敗",
    uploaded_file: "📄 已上傳檔案：",
    selected_file: "已選擇:",
    web_search_used: "🔎 此回答使用了網路搜尋結果",
    loading: "思考中…",
};

impl Phrases {
    /// The transcript text announcing an uploaded file.
    pub fn uploaded_file(&self, name: &str, size: &str) -> String {
        join(self.uploaded_file, &format!("{name} ({size})"))
    }

    /// The label describing the currently selected file.
    pub fn selected_file(&self, name: &str, size: &str) -> String {
        join(self.selected_file, &format!("{name} ({size})"))
    }

    /// The transcript text for a failed exchange.
    pub fn failure(&self, err: &Error) -> String {
        match err {
            Error::Api { status_code, .. } => format!(
                "{}: {}: {status_code}",
                self.error_prefix, self.network_failed
            ),
            other => format!("{}: {other}", self.error_prefix),
        }
    }
}

// Full-width punctuation already separates; ASCII punctuation needs a space.
fn join(prefix: &str, rest: &str) -> String {
    if prefix.ends_with('：') {
        format!("{prefix}{rest}")
    } else {
        format!("{prefix} {rest}")
    }
}
