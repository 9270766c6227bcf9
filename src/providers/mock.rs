//! Offline deterministic backend with canned platform responses

use async_trait::async_trait;
use log::debug;

pub const MOCK_TWITTER_THREAD: &str = r#"Tweet 1 (Hook):
The biggest mistake creators make?

They try to be everywhere at once.

Here's the framework that changed everything for me 🧵

Tweet 2:
I used to spend 10+ hours/week repurposing content manually.

Now? It takes 20 minutes.

The secret isn't working harder—it's working smarter.

Tweet 3:
The Content Multiplication Framework:

1 original piece → 4 platform-optimized versions

Same core message, different formats.

Tweet 4:
Twitter: Thread the key insights
LinkedIn: Professional takeaways
Instagram: Visual + caption
TikTok: Quick video script

Tweet 5:
Each platform has its own language.

Speak it fluently, or get ignored.

Tweet 6:
The result?

3x reach in 1/3 the time.

Your turn: Which platform are you focusing on this week?"#;

pub const MOCK_LINKEDIN_POST: &str = r#"The best content creators I know all follow one rule:

One piece of content, many formats.

Here's why this matters and how to do it:

Most people burn out trying to create from scratch every day.

The solution isn't more time—it's better systems.

The Content Repurposing Framework:

1. Start with your "hero" content (blog, podcast, video)
2. Extract key insights
3. Transform for each platform's unique style
4. Schedule strategically

Key insight: Each platform has its own "language."

→ Twitter wants threads and hot takes
→ LinkedIn wants professional insights
→ Instagram wants visual stories
→ TikTok wants entertainment

Same message. Different delivery.

The result? 3x the reach with 1/3 the effort.

What's your biggest challenge with content creation? Drop it below.

#ContentStrategy #ContentCreation #SocialMediaTips #Productivity"#;

pub const MOCK_INSTAGRAM_CAPTION: &str = r#"POV: You stopped creating from scratch every day and started repurposing 📈

Here's the exact framework 👇

Step 1: Create ONE piece of "hero" content
(blog, video, podcast—your choice!)

Step 2: Extract the key insights 💡
What are the 3-5 biggest takeaways?

Step 3: Transform for each platform
• Twitter → Thread
• LinkedIn → Professional post
• TikTok → Quick video
• IG → This post you're reading

Step 4: Schedule and ship 🚀

The magic? Each platform has its own language.

Speak it fluently = more reach, less burnout.

👇 Save this for later and drop a 🔥 if this was helpful!

.
.
.
#contentcreator #contentstrategy #socialmediatips #contentmarketing #creatoreconomy #productivityhacks #digitalmarketing #socialmediamarketing #contenttips #worksmarter"#;

pub const MOCK_TIKTOK_SCRIPT: &str = r#"[VISUAL: Close-up of you looking frustrated at laptop, then cut to smiling]

HOOK (0-3 sec):
"I was spending 10 hours a week on content. Now? 20 minutes."

[VISUAL: Quick cuts showing you working, calendar, phone notifications]

MAIN CONTENT (3-50 sec):
"Here's the repurposing framework:

One, create your hero content—that's your blog, video, or podcast.

Two, extract the key insights—the 3 to 5 biggest takeaways.

Three, transform for each platform.

Twitter wants threads. LinkedIn wants professional insights. TikTok? Entertainment.

Four, schedule and ship.

Each platform has its own language. Speak it fluently."

[VISUAL: Split screen showing same content on 4 different platforms]

CTA (50-60 sec):
"Follow for more creator shortcuts. Which platform should I cover next?"

---
ESTIMATED WORD COUNT: 124 words
ESTIMATED RUNTIME: ~55 seconds
---"#;

/// Which canned response a prompt maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBranch
{   Twitter
  , LinkedIn
  , Instagram
  , TikTok
}

impl MockBranch
{   /// Classify by platform cue in the rendered prompt.
    /// "Twitter" exact or "tweet" in any case wins, then "LinkedIn",
    /// then "Instagram"; anything else is TikTok.
    pub fn classify(prompt: &str) -> Self
    {   if prompt.contains("Twitter")
          || prompt.to_lowercase().contains("tweet")
        {   MockBranch::Twitter
        } else if prompt.contains("LinkedIn")
        {   MockBranch::LinkedIn
        } else if prompt.contains("Instagram")
        {   MockBranch::Instagram
        } else
        {   MockBranch::TikTok
        }
    }

    pub fn response(&self) -> &'static str
    {   match self
        {   MockBranch::Twitter => MOCK_TWITTER_THREAD
          , MockBranch::LinkedIn => MOCK_LINKEDIN_POST
          , MockBranch::Instagram => MOCK_INSTAGRAM_CAPTION
          , MockBranch::TikTok => MOCK_TIKTOK_SCRIPT
        }
    }
}

/// Pure offline backend for demos and tests. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockClient;

impl MockClient
{   pub fn new() -> Self
    {   MockClient
    }
}

#[async_trait]
impl crate::providers::GenerationBackend for MockClient
{   fn name(&self) -> &str
    {   "mock"
    }

    async fn generate(&self, prompt: &str)
      -> Result<String, crate::error::Error>
    {   let branch = MockBranch::classify(prompt);
        debug!("mock answering with {:?} branch", branch);
        Ok(branch.response().to_string())
    }
}
