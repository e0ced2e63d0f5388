//! Accept-Language negotiation against the configured languages.

use fluent_langneg::{NegotiationStrategy, negotiate_languages};
use unic_langid::LanguageIdentifier;

use crate::utils::{I18nError, I18nResult};

/// How well a negotiated tag satisfies the request.
///
/// Ordered from worst to best so confidences can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    /// Nothing acceptable; the returned tag is only a placeholder.
    No,
    /// Same language but a conflicting region or script, e.g. `en-GB`
    /// requested and `en-US` configured.
    Low,
    /// Same language with no conflicting subtag, e.g. `zh` requested and
    /// `zh-CN` configured.
    High,
    /// The configured tag was requested verbatim.
    Exact,
}

/// Result of [`LanguageMatcher::negotiate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub tag: &'a LanguageIdentifier,
    /// Position of `tag` in the configured list.
    pub index: usize,
    pub confidence: Confidence,
}

impl Match<'_> {
    pub fn is_match(&self) -> bool {
        self.confidence != Confidence::No
    }
}

/// Picks the best configured language for an `Accept-Language` header.
///
/// Earlier configured tags win ties between equally good candidates.
#[derive(Debug, Clone)]
pub struct LanguageMatcher {
    supported: Vec<LanguageIdentifier>,
}

impl LanguageMatcher {
    pub fn new(supported: Vec<LanguageIdentifier>) -> I18nResult<Self> {
        if supported.is_empty() {
            return Err(I18nError::NoLanguage);
        }
        Ok(Self { supported })
    }

    /// Negotiate a header value. Malformed or empty input never fails, it
    /// yields `Confidence::No` with the first configured tag.
    pub fn negotiate(&self, header: &str) -> Match<'_> {
        let requested = parse_accept_language(header);
        self.negotiate_tags(&requested)
    }

    /// Negotiate an already parsed preference list, most preferred first.
    ///
    /// The first requested tag that matches anything decides the result.
    pub fn negotiate_tags(&self, requested: &[LanguageIdentifier]) -> Match<'_> {
        for wanted in requested {
            let negotiated = negotiate_languages(
                std::slice::from_ref(wanted),
                &self.supported,
                None,
                NegotiationStrategy::Matching,
            );

            let best = negotiated.first().and_then(|tag| {
                self.supported.iter().position(|candidate| std::ptr::eq(candidate, *tag))
            });
            if let Some(index) = best {
                let tag = &self.supported[index];
                return Match { tag, index, confidence: confidence_of(wanted, tag) };
            }
        }

        Match { tag: &self.supported[0], index: 0, confidence: Confidence::No }
    }
}

fn confidence_of(wanted: &LanguageIdentifier, tag: &LanguageIdentifier) -> Confidence {
    if wanted == tag {
        Confidence::Exact
    } else if wanted.language == tag.language
        && compatible(wanted.script, tag.script)
        && compatible(wanted.region, tag.region)
    {
        Confidence::High
    } else {
        Confidence::Low
    }
}

fn compatible<T: PartialEq>(wanted: Option<T>, tag: Option<T>) -> bool {
    match (wanted, tag) {
        (Some(wanted), Some(tag)) => wanted == tag,
        _ => true,
    }
}

/// Parse an RFC 7231 `Accept-Language` value into tags, most preferred
/// first.
///
/// Entries are `tag[;q=weight]`. The sort by weight is stable so equal
/// weights keep header order. Extension and private-use subtags are ignored,
/// so `zh-CN-u-nu-hanidec` negotiates as `zh-CN`. `q=0`, bad weights, `*`
/// and tags that are not valid BCP-47 are dropped.
pub fn parse_accept_language(header: &str) -> Vec<LanguageIdentifier> {
    let mut weighted: Vec<(u16, LanguageIdentifier)> = Vec::new();

    for entry in header.split(',') {
        let (tag, params) = entry.split_once(';').unwrap_or((entry, ""));
        let tag = strip_extensions(tag.trim());
        if tag.is_empty() || tag == "*" {
            continue;
        }

        let mut quality = Some(1000);
        for param in params.split(';') {
            let param = param.trim();
            if let Some(value) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
                quality = parse_quality(value);
            }
        }

        let Some(quality) = quality.filter(|q| *q > 0) else {
            continue;
        };
        if let Ok(tag) = tag.parse::<LanguageIdentifier>() {
            weighted.push((quality, tag));
        }
    }

    weighted.sort_by(|a, b| b.0.cmp(&a.0));
    weighted.into_iter().map(|(_, tag)| tag).collect()
}

/// Cut `tag` before its first singleton subtag (`-u-`, `-t-`, `-x-`, ...).
fn strip_extensions(tag: &str) -> &str {
    let mut offset: usize = 0;
    for subtag in tag.split(['-', '_']) {
        if subtag.len() == 1 {
            return &tag[..offset.saturating_sub(1)];
        }
        offset += subtag.len() + 1;
    }
    tag
}

/// Weight scaled to thousandths, `None` outside `0..=1`.
fn parse_quality(value: &str) -> Option<u16> {
    let q: f32 = value.trim().parse().ok()?;
    if (0.0..=1.0).contains(&q) { Some((q * 1000.0).round() as u16) } else { None }
}
