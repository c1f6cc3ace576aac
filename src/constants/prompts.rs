//! Prompt text and canned fallback content for the generation pipeline.

pub const PROBLEM_SYSTEM_PROMPT: &str = "You are a math word problem generator for arithmetic practice. \
You MUST return a single JSON object and nothing else. No prose, no markdown, no extra keys.\n\
\n\
### Required JSON shape\n\
- problem_text: string (the full word problem, 1-3 sentences, no solution or answer inside)\n\
- final_answer: number (the single numeric answer to the problem)\n\
\n\
### Rules\n\
1. The problem must be solvable with the requested operation(s) only.\n\
2. The final answer must be exact and representable as a decimal number.\n\
3. Do not include the answer, hints, or working inside problem_text.\n\
4. Keep quantities realistic for the requested difficulty.";

/// Prepended to the user prompt on the plain-mode retry after a structured
/// attempt produced unusable output. Re-requests the same JSON shape in the
/// simplest possible terms.
pub const PLAIN_RETRY_PREFIX: &str = "Your previous output could not be parsed. Respond again with ONLY one JSON object, \
no code fences and no commentary, using exactly the keys that were requested.\n\n";

pub const FEEDBACK_SYSTEM_PROMPT: &str = "You are an encouraging math tutor reviewing one student answer to a word problem. \
Return a single JSON object with exactly one key:\n\
- feedback: string (2-3 sentences, warm and specific, aimed at a student)\n\
Acknowledge close attempts as close. Never be sarcastic.";

pub const HINT_SYSTEM_PROMPT: &str = "You are a math tutor giving one nudge toward solving a word problem. \
Return a single JSON object with exactly one key:\n\
- hint: string (one sentence pointing at the right operation or first step)\n\
Never state or imply the numeric answer.";

pub const SOLUTION_SYSTEM_PROMPT: &str = "You are a math tutor writing a step-by-step solution to a word problem. \
Return a single JSON object with exactly one key:\n\
- solution: string (numbered steps, each on its own line, ending with the final answer)";

/// Topic hints rotated into the generation prompt; a different one is picked
/// when a freshly generated problem duplicates the previous session's text.
pub const TOPIC_HINTS: &[&str] = &[
    "sharing snacks with friends",
    "saving up pocket money",
    "a school bake sale",
    "planting a vegetable garden",
    "a train trip between towns",
    "stacking books in a library",
    "filling water bottles for a hike",
    "scoring points in a board game",
];

/// Served when every candidate model fails during problem generation.
pub const FALLBACK_PROBLEMS: &[(&str, f64)] = &[
    (
        "Maya has 24 stickers and shares them equally among 6 friends. How many stickers does each friend get?",
        4.0,
    ),
    (
        "A baker makes 3 trays of 12 muffins each and sells 17 muffins. How many muffins are left?",
        19.0,
    ),
    (
        "Leo reads 15 pages on Monday and 22 pages on Tuesday. How many pages has he read in total?",
        37.0,
    ),
    (
        "A ribbon 7.5 meters long is cut into pieces of 1.5 meters. How many pieces are there?",
        5.0,
    ),
];

pub const FALLBACK_NOTE: &str =
    "The problem generator is temporarily unavailable; here is a practice problem from our built-in set.";

pub const FALLBACK_FEEDBACK_CORRECT: &str =
    "That's exactly right — great work! Your answer matches perfectly.";

pub const FALLBACK_FEEDBACK_NEAR: &str =
    "You're very close! Double-check your final calculation step and try the next one.";

pub const FALLBACK_FEEDBACK_WRONG: &str =
    "Not quite this time. Reread the problem, decide which operation it needs, and give it another go on the next problem.";
