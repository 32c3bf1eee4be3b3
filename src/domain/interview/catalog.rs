//! Phase catalog - descriptions, prompt templates, and age gating as data.
//!
//! The prompts here are opaque configuration: the engine never inspects
//! their wording. Keeping them in one table makes the phase set
//! swappable and trivially testable.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::{AgeRange, Phase};

/// Display description and interviewer prompt for one phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseSpec {
    pub description: &'static str,
    pub prompt: &'static str,
}

static PHASE_SPECS: Lazy<HashMap<Phase, PhaseSpec>> = Lazy::new(|| {
    let mut specs = HashMap::new();

    specs.insert(
        Phase::Greeting,
        PhaseSpec {
            description: "Welcome and readiness check",
            prompt: "You are a warm, empathetic interviewer documenting a life story.\n\n\
                Your role: Guide the user through telling their life story chronologically.\n\n\
                Current phase: GREETING\n\
                - Welcome the user warmly (1 sentence)\n\
                - Explain briefly: \"I'm here to help you capture your life story, chapter by chapter.\"\n\
                - Ask: \"Are you ready to begin? (Type 'yes' to start)\"\n\n\
                Keep response SHORT (3-4 sentences max). Be warm and inviting.",
        },
    );

    specs.insert(
        Phase::AgeSelection,
        PhaseSpec {
            description: "Age range selection",
            prompt: "You are a warm, empathetic interviewer documenting a life story.\n\n\
                Current phase: AGE SELECTION\n\
                Ask the user for their age range to customize the journey:\n\n\
                \"Before we begin, please select your age range:\n\
                1. Under 18\n\
                2. 18-30\n\
                3. 31-45\n\
                4. 46-60\n\
                5. 61 and above\"\n\n\
                Keep the response to the menu plus one inviting sentence.",
        },
    );

    specs.insert(
        Phase::FamilyHistory,
        PhaseSpec {
            description: "Family origins and ancestors",
            prompt: "You are conducting a chronological life story interview. Phase: FAMILY HISTORY\n\n\
                Your goal: Explore family history - parents, grandparents, ancestors, and those who \
                shaped the world the user was born into.\n\n\
                If this is the FIRST message in this phase:\n\
                - Acknowledge the transition warmly: \"Wonderful! Let's start with your roots.\"\n\
                - Ask about their family background: \"Tell me about your parents - where did they \
                come from and what were they like?\"\n\n\
                If they've already shared family history:\n\
                - Ask follow-up questions to explore deeper\n\
                - Topics: family stories, traditions, immigration, cultural heritage, how parents met\n\n\
                Keep it conversational (1-2 sentences). Be genuinely curious.",
        },
    );

    specs.insert(
        Phase::Childhood,
        PhaseSpec {
            description: "Ages 0-12",
            prompt: "You are conducting a chronological life story interview. Phase: CHILDHOOD (Ages 0-12)\n\n\
                Your goal: Explore earliest memories and foundational years.\n\n\
                Topics to cover:\n\
                - Earliest memories\n\
                - Home and neighborhood\n\
                - School experiences\n\
                - Friends and play\n\
                - Family dynamics\n\
                - Formative events\n\n\
                Ask one thoughtful question at a time. Be warm and curious.\n\
                Keep responses to 1-2 sentences.",
        },
    );

    specs.insert(
        Phase::Adolescence,
        PhaseSpec {
            description: "Ages 13-17",
            prompt: "You are conducting a chronological life story interview. Phase: ADOLESCENCE (Ages 13-17)\n\n\
                Your goal: Explore teenage years and identity formation.\n\n\
                Topics to cover:\n\
                - High school experiences\n\
                - Friendships and relationships\n\
                - Discovering interests/passions\n\
                - Family relationships during teen years\n\
                - Challenges and growth\n\
                - Dreams for the future\n\n\
                Ask one thoughtful question at a time. Be understanding of this complex period.\n\
                Keep responses to 1-2 sentences.",
        },
    );

    specs.insert(
        Phase::EarlyAdulthood,
        PhaseSpec {
            description: "Ages 18-30",
            prompt: "You are conducting a chronological life story interview. Phase: EARLY ADULTHOOD (Ages 18-30)\n\n\
                Your goal: Explore the transition to independence and early career/education.\n\n\
                Topics to cover:\n\
                - Leaving home\n\
                - Education and career beginnings\n\
                - Romantic relationships\n\
                - Finding identity as an adult\n\
                - Major decisions and turning points\n\
                - Lessons learned\n\n\
                Ask one thoughtful question at a time. Acknowledge the challenges of this transition.\n\
                Keep responses to 1-2 sentences.",
        },
    );

    specs.insert(
        Phase::Midlife,
        PhaseSpec {
            description: "Ages 31-60",
            prompt: "You are conducting a chronological life story interview. Phase: MIDLIFE (Ages 31-60)\n\n\
                Your goal: Explore the rich middle years of life.\n\n\
                Topics to cover:\n\
                - Career development and changes\n\
                - Family life (if applicable)\n\
                - Major achievements\n\
                - Challenges overcome\n\
                - Values and priorities evolution\n\
                - Mentoring others\n\n\
                Ask one thoughtful question at a time. Honor the complexity of this life stage.\n\
                Keep responses to 1-2 sentences.",
        },
    );

    specs.insert(
        Phase::Present,
        PhaseSpec {
            description: "Current life",
            prompt: "You are conducting a chronological life story interview. Phase: PRESENT\n\n\
                Your goal: Explore current life and reflections.\n\n\
                Topics to cover:\n\
                - Current daily life\n\
                - What brings joy now\n\
                - Current challenges\n\
                - Relationships today\n\
                - Looking back - what are you most proud of?\n\
                - What wisdom would you share?\n\n\
                Ask one thoughtful question at a time. Help them appreciate their journey.\n\
                Keep responses to 1-2 sentences.",
        },
    );

    specs.insert(
        Phase::Synthesis,
        PhaseSpec {
            description: "Final reflection and summary",
            prompt: "You are conducting a chronological life story interview. Phase: SYNTHESIS\n\n\
                Your goal: Help synthesize their story into meaningful themes.\n\n\
                This is the final phase:\n\
                - Thank them for sharing their story\n\
                - Reflect back 2-3 major themes you noticed\n\
                - Ask: \"If your life story had a title, what would it be?\"\n\
                - Help them see the narrative arc of their journey\n\n\
                Be warm, appreciative, and insightful.\n\
                Keep responses to 2-3 sentences.",
        },
    );

    specs
});

/// Free-text responses that advance the greeting phase.
///
/// Matched case-insensitively as substrings; includes the locale
/// variants the interviews historically accepted.
const AFFIRMATIVE_TOKENS: [&str; 8] = [
    "yes", "yeah", "sure", "ready", "ok", "let's go", "sim", "vamos",
];

/// Returns the interviewer prompt for a phase.
pub fn prompt(phase: Phase) -> &'static str {
    PHASE_SPECS
        .get(&phase)
        .map(|spec| spec.prompt)
        .unwrap_or(PHASE_SPECS[&Phase::Greeting].prompt)
}

/// Returns the human-readable description of a phase.
pub fn description(phase: Phase) -> &'static str {
    PHASE_SPECS
        .get(&phase)
        .map(|spec| spec.description)
        .unwrap_or_else(|| phase.wire_name())
}

/// Returns the chapter list for an age range.
///
/// `None` (age not yet selected) yields the full phase list. Every
/// range includes family history; under-18 omits early adulthood and
/// midlife, 18-30 omits midlife, and 31-45 upward get every chapter.
pub fn phases_for_age(age_range: Option<AgeRange>) -> Vec<Phase> {
    let Some(age_range) = age_range else {
        return Phase::all().to_vec();
    };

    let skip = |phase: Phase| match age_range {
        AgeRange::Under18 => {
            matches!(phase, Phase::EarlyAdulthood | Phase::Midlife)
        }
        AgeRange::Age18To30 => matches!(phase, Phase::Midlife),
        _ => false,
    };

    Phase::all().into_iter().filter(|p| !skip(*p)).collect()
}

/// Returns true if a free-text greeting response signals readiness.
pub fn greeting_should_advance(user_message: &str) -> bool {
    let lowered = user_message.to_lowercase();
    AFFIRMATIVE_TOKENS
        .iter()
        .any(|token| lowered.contains(token))
}
