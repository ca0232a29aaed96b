use serde::{Deserialize, Serialize};
use std::fmt;

/// Word-count targets for a content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthTarget {
    pub min: usize,
    pub max: usize,
    pub optimal: usize,
}

impl LengthTarget {
    const fn new(min: usize, max: usize, optimal: usize) -> Self {
        Self { min, max, optimal }
    }
}

/// Kind of marketing asset being analyzed. Unrecognized names are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Email,
    SocialPost,
    SocialAd,
    SearchAd,
    BlogPost,
    LandingPage,
    VideoScript,
    Infographic,
    Newsletter,
    PressRelease,
    Other(String),
}

const FALLBACK_TARGET: LengthTarget = LengthTarget::new(50, 500, 200);

impl ContentType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "EMAIL" => ContentType::Email,
            "SOCIAL_POST" => ContentType::SocialPost,
            "SOCIAL_AD" => ContentType::SocialAd,
            "SEARCH_AD" => ContentType::SearchAd,
            "BLOG_POST" => ContentType::BlogPost,
            "LANDING_PAGE" => ContentType::LandingPage,
            "VIDEO_SCRIPT" => ContentType::VideoScript,
            "INFOGRAPHIC" => ContentType::Infographic,
            "NEWSLETTER" => ContentType::Newsletter,
            "PRESS_RELEASE" => ContentType::PressRelease,
            _ => ContentType::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Email => "EMAIL",
            ContentType::SocialPost => "SOCIAL_POST",
            ContentType::SocialAd => "SOCIAL_AD",
            ContentType::SearchAd => "SEARCH_AD",
            ContentType::BlogPost => "BLOG_POST",
            ContentType::LandingPage => "LANDING_PAGE",
            ContentType::VideoScript => "VIDEO_SCRIPT",
            ContentType::Infographic => "INFOGRAPHIC",
            ContentType::Newsletter => "NEWSLETTER",
            ContentType::PressRelease => "PRESS_RELEASE",
            ContentType::Other(raw) => raw,
        }
    }

    pub fn length_target(&self) -> LengthTarget {
        match self {
            ContentType::Email => LengthTarget::new(50, 300, 150),
            ContentType::SocialPost => LengthTarget::new(10, 60, 30),
            ContentType::SocialAd => LengthTarget::new(10, 50, 25),
            ContentType::SearchAd => LengthTarget::new(5, 30, 15),
            ContentType::BlogPost => LengthTarget::new(300, 2000, 1000),
            ContentType::LandingPage => LengthTarget::new(100, 800, 400),
            ContentType::VideoScript => LengthTarget::new(100, 1000, 300),
            ContentType::Infographic => LengthTarget::new(20, 200, 80),
            ContentType::Newsletter => LengthTarget::new(200, 1000, 500),
            ContentType::PressRelease => LengthTarget::new(300, 800, 500),
            ContentType::Other(_) => FALLBACK_TARGET,
        }
    }

    /// Formats that exist to drive an action
    pub fn requires_cta(&self) -> bool {
        matches!(
            self,
            ContentType::Email
                | ContentType::SocialAd
                | ContentType::SearchAd
                | ContentType::LandingPage
        )
    }
}

impl From<String> for ContentType {
    fn from(raw: String) -> Self {
        ContentType::parse(&raw)
    }
}

impl From<ContentType> for String {
    fn from(ct: ContentType) -> Self {
        ct.as_str().to_string()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_leniently() {
        assert_eq!(ContentType::parse("EMAIL"), ContentType::Email);
        assert_eq!(ContentType::parse("social_post"), ContentType::SocialPost);
        assert_eq!(ContentType::parse("Landing Page"), ContentType::LandingPage);
        assert_eq!(
            ContentType::parse("PODCAST"),
            ContentType::Other("PODCAST".into())
        );
    }

    #[test]
    fn unknown_types_fall_back() {
        let target = ContentType::parse("PODCAST").length_target();
        assert_eq!(target, LengthTarget::new(50, 500, 200));
        assert!(!ContentType::parse("PODCAST").requires_cta());
    }

    #[test]
    fn serde_uses_wire_names() {
        let ct: ContentType = serde_json::from_str("\"SEARCH_AD\"").unwrap();
        assert_eq!(ct, ContentType::SearchAd);
        assert_eq!(serde_json::to_string(&ct).unwrap(), "\"SEARCH_AD\"");
    }
}
