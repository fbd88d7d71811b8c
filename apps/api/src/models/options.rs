//! Generation preferences — length and tone enums with their prompt fragments.
//!
//! Both enums persist as their lowercase string tag (`short`, `professional`, ...).

use serde::{Deserialize, Serialize};

/// Target length of the generated letter. Controls the word-count instruction
/// and the hard `max_output_tokens` ceiling sent with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthOption {
    Short,
    #[default]
    Medium,
    Long,
}

impl LengthOption {
    pub fn all() -> [LengthOption; 3] {
        [LengthOption::Short, LengthOption::Medium, LengthOption::Long]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthOption::Short => "short",
            LengthOption::Medium => "medium",
            LengthOption::Long => "long",
        }
    }

    /// Decodes a persisted tag. Unknown tags fall back to the default.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "short" => LengthOption::Short,
            "medium" => LengthOption::Medium,
            "long" => LengthOption::Long,
            _ => LengthOption::default(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LengthOption::Short => "Short",
            LengthOption::Medium => "Medium",
            LengthOption::Long => "Long",
        }
    }

    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            LengthOption::Short => {
                "Keep the cover letter concise and to the point, approximately 200-300 words. \
                 Do not exceed 300 words."
            }
            LengthOption::Medium => {
                "Write a standard length cover letter, approximately 300-500 words, \
                 balancing detail and brevity. Do not exceed 500 words."
            }
            LengthOption::Long => {
                "Write a comprehensive and detailed cover letter, approximately 500-700 words, \
                 fully expanding on experience and skills. Do not exceed 750 words."
            }
        }
    }

    /// Output-token ceiling. Sized for the word limit plus the JSON wrapper.
    pub fn max_output_tokens(&self) -> u32 {
        match self {
            LengthOption::Short => 450,
            LengthOption::Medium => 750,
            LengthOption::Long => 1200,
        }
    }
}

/// Voice the model is asked to write in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneOption {
    #[default]
    Professional,
    Conversational,
    Simple,
    Confident,
}

impl ToneOption {
    pub fn all() -> [ToneOption; 4] {
        [
            ToneOption::Professional,
            ToneOption::Conversational,
            ToneOption::Simple,
            ToneOption::Confident,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToneOption::Professional => "professional",
            ToneOption::Conversational => "conversational",
            ToneOption::Simple => "simple",
            ToneOption::Confident => "confident",
        }
    }

    /// Decodes a persisted tag. Unknown tags fall back to the default.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "professional" => ToneOption::Professional,
            "conversational" => ToneOption::Conversational,
            "simple" => ToneOption::Simple,
            "confident" => ToneOption::Confident,
            _ => ToneOption::default(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ToneOption::Professional => "Professional",
            ToneOption::Conversational => "Conversational",
            ToneOption::Simple => "Simple & Direct",
            ToneOption::Confident => "Confident",
        }
    }

    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            ToneOption::Professional => {
                "Use a professional, polished, and formal tone. Suitable for corporate environments."
            }
            ToneOption::Conversational => {
                "Use a warm, human, and conversational tone. Avoid overly stiff or bureaucratic \
                 language. Keep it professional but approachable."
            }
            ToneOption::Simple => {
                "Use simple, clear, and direct language. Avoid jargon, complex sentence \
                 structures, and flowery words. Get straight to the point."
            }
            ToneOption::Confident => {
                "Use a strong, persuasive, and confident tone. Highlight achievements boldly \
                 and show conviction in suitability for the role."
            }
        }
    }
}

/// Entry in the option listing returned to the settings screen.
#[derive(Debug, Clone, Serialize)]
pub struct OptionDescriptor {
    pub tag: &'static str,
    pub display_name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionListing {
    pub lengths: Vec<OptionDescriptor>,
    pub tones: Vec<OptionDescriptor>,
    pub default_length: LengthOption,
    pub default_tone: ToneOption,
}

pub fn option_listing() -> OptionListing {
    OptionListing {
        lengths: LengthOption::all()
            .iter()
            .map(|o| OptionDescriptor {
                tag: o.as_str(),
                display_name: o.display_name(),
            })
            .collect(),
        tones: ToneOption::all()
            .iter()
            .map(|o| OptionDescriptor {
                tag: o.as_str(),
                display_name: o.display_name(),
            })
            .collect(),
        default_length: LengthOption::default(),
        default_tone: ToneOption::default(),
    }
}
