//! Platform prompt templates and the fixed format registry

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use log::{debug, error};

/// Placeholder substituted with the caller's content
pub const CONTENT_PLACEHOLDER: &str = "{content}";

pub const TWITTER_THREAD_TEMPLATE: &str = r#"You are a social media expert specializing in viral Twitter threads.

Transform the following long-form content into an engaging Twitter thread.

RULES:
- Start with a STRONG hook (first tweet) that grabs attention
- Create 5-8 tweets total
- Each tweet should be under 280 characters
- Use line breaks for readability
- End with a clear call-to-action
- Maintain the core message but make it punchy
- Use numbers, stats, or contrarian takes when available

OUTPUT FORMAT:
Tweet 1 (Hook):
[Tweet content]

Tweet 2:
[Tweet content]

... (continue for all tweets)

---

ORIGINAL CONTENT:
{content}

---

Generate the Twitter thread now:"#;

pub const LINKEDIN_POST_TEMPLATE: &str = r#"You are a LinkedIn content strategist who writes professional, thought-provoking posts.

Transform the following long-form content into a compelling LinkedIn post.

RULES:
- Professional but conversational tone
- Start with an attention-grabbing opening line
- Use short paragraphs (1-2 sentences max)
- Include actionable insights or takeaways
- End with a question to encourage engagement
- Can use bullet points for key insights
- Keep under 3000 characters
- No hashtags in the body (add 3-5 at the end)

OUTPUT FORMAT:
[Opening hook]

[Main content with insights]

[Key takeaways as bullets if appropriate]

[Closing question]

#hashtags

---

ORIGINAL CONTENT:
{content}

---

Generate the LinkedIn post now:"#;

pub const INSTAGRAM_CAPTION_TEMPLATE: &str = r#"You are an Instagram content creator who writes engaging, emoji-rich captions.

Transform the following long-form content into an Instagram caption.

RULES:
- Start with a hook that stops the scroll
- Use emojis throughout (but don't overdo it)
- Break text into readable chunks with line breaks
- Include a clear call-to-action
- Add relevant hashtags at the end (10-15)
- Keep it authentic and relatable
- Maximum 2200 characters

OUTPUT FORMAT:
[Hook with emojis]

[Main content with emojis and line breaks]

👇 [Call-to-action]

.
.
.
#hashtag1 #hashtag2 #hashtag3 ...

---

ORIGINAL CONTENT:
{content}

---

Generate the Instagram caption now:"#;

pub const TIKTOK_SCRIPT_TEMPLATE: &str = r#"You are a TikTok scriptwriter who creates viral short-form video content.

Transform the following long-form content into a 60-second TikTok video script.

RULES:
- Total runtime: ~60 seconds (about 150-180 words spoken)
- Start with a pattern interrupt (unexpected opening)
- Hook viewers in the first 3 seconds
- Use a clear structure: Hook → Problem/Premise → Solution/Insight → CTA
- Include visual cues in [brackets]
- Write for spoken delivery (conversational, not formal)
- End with a clear call-to-action

OUTPUT FORMAT:
[VISUAL: Describe opening shot]

HOOK (0-3 sec):
"Opening line that grabs attention..."

[VISUAL: Transition]

MAIN CONTENT (3-50 sec):
"Key points and insights..."

[VISUAL: B-roll or text overlays]

CTA (50-60 sec):
"Call-to-action for engagement..."

---
ESTIMATED WORD COUNT: X words
ESTIMATED RUNTIME: ~X seconds
---

ORIGINAL CONTENT:
{content}

---

Generate the TikTok script now:"#;

/// Closed set of target formats, ordered as the registry lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatId
{   /// Short thread of tweets
    Twitter
  , /// Professional post
    LinkedIn
  , /// Image caption
    Instagram
  , /// Spoken short video script
    TikTok
}

impl FormatId
{   pub const ALL: [FormatId; 4] = [
      FormatId::Twitter
    , FormatId::LinkedIn
    , FormatId::Instagram
    , FormatId::TikTok
    ];

    pub fn as_str(&self) -> &'static str
    {   match self
        {   FormatId::Twitter => "twitter"
          , FormatId::LinkedIn => "linkedin"
          , FormatId::Instagram => "instagram"
          , FormatId::TikTok => "tiktok"
        }
    }
}

impl fmt::Display for FormatId
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl FromStr for FormatId
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   FormatId::ALL
          .iter()
          .copied()
          .find(|id| id.as_str() == s)
          .ok_or_else(|| {
            let available: Vec<&str>
              = FormatId::ALL.iter().map(|id| id.as_str()).collect();
            crate::error::Error::UnknownFormat(format!(
              "{}. Available: {:?}", s, available
            ))
          })
    }
}

/// What a format's length limit counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit
{   /// Characters per individual unit (one tweet)
    CharsPerUnit
  , /// Characters in the whole output
    Chars
  , /// Spoken words
    Words
}

/// Immutable description of one target format
#[derive(Debug, Clone, PartialEq)]
pub struct TargetFormat
{   pub id: FormatId
  , pub name: &'static str
  , pub template: &'static str
  , pub max_length: usize
  , pub length_unit: LengthUnit
  , pub description: &'static str
}

impl TargetFormat
{   /// Substitute the content into the template's placeholder verbatim
    pub fn render(&self, content: &str) -> String
    {   self.template.replacen(CONTENT_PLACEHOLDER, content, 1)
    }
}

static FORMATS: [TargetFormat; 4] = [
  TargetFormat
  {   id: FormatId::Twitter
    , name: "Twitter Thread"
    , template: TWITTER_THREAD_TEMPLATE
    , max_length: 280
    , length_unit: LengthUnit::CharsPerUnit
    , description: "5-8 tweet thread optimized for engagement"
  }
, TargetFormat
  {   id: FormatId::LinkedIn
    , name: "LinkedIn Post"
    , template: LINKEDIN_POST_TEMPLATE
    , max_length: 3000
    , length_unit: LengthUnit::Chars
    , description: "Professional post with thought leadership tone"
  }
, TargetFormat
  {   id: FormatId::Instagram
    , name: "Instagram Caption"
    , template: INSTAGRAM_CAPTION_TEMPLATE
    , max_length: 2200
    , length_unit: LengthUnit::Chars
    , description: "Engaging caption with emojis and hashtags"
  }
, TargetFormat
  {   id: FormatId::TikTok
    , name: "TikTok Script"
    , template: TIKTOK_SCRIPT_TEMPLATE
    , max_length: 180
    , length_unit: LengthUnit::Words
    , description: "60-second video script with visual cues"
  }
];

/// Read-only registry over the fixed format table
#[derive(Debug, Clone, Copy)]
pub struct TemplateRegistry
{   formats: &'static [TargetFormat]
}

impl Default for TemplateRegistry
{   fn default() -> Self
    {   TemplateRegistry::new()
    }
}

impl TemplateRegistry
{   pub fn new() -> Self
    {   TemplateRegistry { formats: &FORMATS }
    }

    /// Look up a format by its id string
    pub fn lookup(&self, format_id: &str)
      -> Result<&TargetFormat, crate::error::Error>
    {   let id: FormatId = format_id.parse().map_err(|e| {
          error!("Unknown format requested: {}", format_id);
          e
        })?;
        debug!("Resolved format: {}", id);
        self.get(id).ok_or_else(|| {
          crate::error::Error::UnknownFormat(format_id.to_string())
        })
    }

    /// Non-failing lookup by id
    pub fn info(&self, format_id: &str) -> Option<&TargetFormat>
    {   self.formats.iter().find(|f| f.id.as_str() == format_id)
    }

    pub fn get(&self, id: FormatId) -> Option<&TargetFormat>
    {   self.formats.iter().find(|f| f.id == id)
    }

    /// All formats in registry order
    pub fn list_all(&self) -> &[TargetFormat]
    {   self.formats
    }

    pub fn ids(&self) -> Vec<FormatId>
    {   self.formats.iter().map(|f| f.id).collect()
    }
}
