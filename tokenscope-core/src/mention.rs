//! Social media mentions, before and after verification

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use std::sync::LazyLock;

/// Interaction counters attached to a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: u64,
    pub reposts: u64,
    pub replies: u64,
}

impl Engagement {
    pub fn new(likes: u64, reposts: u64, replies: u64) -> Self {
        Self { likes, reposts, replies }
    }

    pub fn is_empty(&self) -> bool {
        self.likes == 0 && self.reposts == 0 && self.replies == 0
    }
}

impl AddAssign for Engagement {
    fn add_assign(&mut self, other: Self) {
        self.likes = self.likes.saturating_add(other.likes);
        self.reposts = self.reposts.saturating_add(other.reposts);
        self.replies = self.replies.saturating_add(other.replies);
    }
}

/// A candidate post returned by a search backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMention {
    pub title: String,
    pub body: String,
    pub url: String,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    /// Absent when the backend does not report counters
    pub engagement: Option<Engagement>,
}

impl RawMention {
    pub fn new(title: &str, body: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            url: url.to_string(),
            author: None,
            published_at: None,
            engagement: None,
        }
    }

    pub fn with_author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn with_engagement(mut self, engagement: Engagement) -> Self {
        self.engagement = Some(engagement);
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Case-folded title and body, the text all relevance checks run against
    pub fn scored_text(&self) -> String {
        format!("{} {}", self.title, self.body).to_lowercase()
    }

    /// Lowercase host of the mention URL
    pub fn host(&self) -> Option<String> {
        url_host(&self.url)
    }

    /// Author handle, if one is present and non-blank
    pub fn author_handle(&self) -> Option<&str> {
        self.author.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }

    /// Counters, zero when absent
    pub fn engagement_or_default(&self) -> Engagement {
        self.engagement.unwrap_or_default()
    }

    /// Whether the backend attached engagement or author information
    pub fn carries_metadata(&self) -> bool {
        self.engagement.is_some() || self.author_handle().is_some()
    }
}

/// A mention that passed the verification gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedMention {
    #[serde(flatten)]
    pub mention: RawMention,
    /// Accumulated verification score (0-100+)
    pub verification_score: u32,
}

static HOST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z][a-z0-9+.\-]*://(?:[^@/?#]*@)?([^/:?#]+)").unwrap()
});

static STATUS_HANDLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(?:www\.|mobile\.)?(?:x|twitter)\.com/([A-Za-z0-9_]{1,15})/status/")
        .unwrap()
});

/// Lowercase host of a URL, without a leading `www.`
pub fn url_host(url: &str) -> Option<String> {
    HOST_REGEX.captures(url.trim()).map(|caps| {
        let host = caps[1].to_lowercase();
        host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
    })
}

/// True if `host` is `domain` or one of its subdomains
pub fn host_matches(host: &str, domain: &str) -> bool {
    let domain = domain.trim().trim_start_matches("www.").to_lowercase();
    host == domain || host.ends_with(&format!(".{}", domain))
}

/// `@handle` of the author of an X/Twitter status URL
pub fn handle_from_url(url: &str) -> Option<String> {
    STATUS_HANDLE_REGEX
        .captures(url.trim())
        .map(|caps| format!("@{}", &caps[1]))
        .filter(|h| !h.eq_ignore_ascii_case("@i"))
}
