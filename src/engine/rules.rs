//! Response rules for the chat engine
//!
//! A rule pairs a [`Trigger`] with a canned answer. Rules live in an ordered
//! list and the first satisfied trigger wins, so the order of
//! [`default_rules`] is part of the engine's behaviour: a query mentioning both
//! "math" and "science" resolves to the math rule because it comes first.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static GREETING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(hi|hello|hey|greetings)").expect("Invalid regex: greeting pattern")
});

/// Condition tested against a lower-cased query
#[derive(Clone)]
pub enum Trigger {
    /// Query contains at least one of the substrings
    AnyOf(Vec<String>),
    /// Query contains every one of the substrings
    AllOf(Vec<String>),
    /// Query satisfies the regular expression
    Pattern(Regex),
}

impl Trigger {
    /// Substring trigger satisfied by any keyword
    pub fn any_of(keywords: &[&str]) -> Self {
        Trigger::AnyOf(lowercase_all(keywords))
    }

    /// Substring trigger requiring every keyword
    pub fn all_of(keywords: &[&str]) -> Self {
        Trigger::AllOf(lowercase_all(keywords))
    }

    /// Regex trigger, compiled from `pattern`
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Trigger::Pattern)
            .map_err(|e| Error::Config(format!("Invalid trigger pattern '{}': {}", pattern, e)))
    }

    /// Test the trigger against an already lower-cased query.
    ///
    /// Substring tests are not word-bounded: "mathematics" satisfies "math".
    pub fn matches(&self, normalized: &str) -> bool {
        match self {
            Trigger::AnyOf(keywords) => keywords.iter().any(|k| normalized.contains(k.as_str())),
            Trigger::AllOf(keywords) => {
                !keywords.is_empty() && keywords.iter().all(|k| normalized.contains(k.as_str()))
            }
            Trigger::Pattern(re) => re.is_match(normalized),
        }
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::AnyOf(k) => f.debug_tuple("AnyOf").field(k).finish(),
            Trigger::AllOf(k) => f.debug_tuple("AllOf").field(k).finish(),
            Trigger::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
        }
    }
}

fn lowercase_all(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}

/// A named `(trigger, response)` pair
#[derive(Debug, Clone)]
pub struct Rule {
    /// Stable rule name, used in logs and selection results
    pub name: String,
    /// Condition that selects this rule
    pub trigger: Trigger,
    /// Canned answer returned verbatim
    pub response: String,
}

impl Rule {
    /// Create a new rule
    pub fn new(name: impl Into<String>, trigger: Trigger, response: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trigger,
            response: response.into(),
        }
    }

    /// Whether this rule fires for an already lower-cased query
    pub fn matches(&self, normalized: &str) -> bool {
        self.trigger.matches(normalized)
    }
}

/// Generic prompts used when no rule matches
pub const DEFAULT_FALLBACKS: &[&str] = &[
    "That's a great question! Let me help you understand this better. Could you provide more details about what specific aspect you'd like to explore?",
    "I'm here to assist you with your learning journey. Let's break down this topic step by step. What's the main challenge you're facing?",
    "Excellent question! To give you the most helpful answer, could you tell me more about the context? Are you working on an assignment, preparing for a test, or just curious to learn more?",
    "I'd be happy to help you with that! Learning is a process, and asking questions is a crucial part. Let's work through this together. What have you tried so far?",
];

/// The built-in rule table, in priority order
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "greeting",
            Trigger::Pattern(GREETING_PATTERN.clone()),
            "Hello! I'm Classmate AI, your educational assistant. I'm here to help you with any subject - math, science, writing, study tips, and more. What would you like to learn about today?",
        ),
        // Math topics
        Rule::new(
            "quadratic",
            Trigger::any_of(&["quadratic"]),
            "The quadratic formula is x = (-b ± √(b²-4ac)) / 2a. It's used to solve equations in the form ax² + bx + c = 0. For example, to solve x² - 5x + 6 = 0, you'd identify a=1, b=-5, c=6, then plug them into the formula to get x = 2 or x = 3.",
        ),
        Rule::new(
            "pythagorean",
            Trigger::any_of(&["pythagorean"]),
            "The Pythagorean theorem states that in a right triangle, a² + b² = c², where c is the hypotenuse (longest side). For example, if a triangle has sides of 3 and 4, the hypotenuse would be √(3² + 4²) = √25 = 5.",
        ),
        Rule::new(
            "fractions",
            Trigger::any_of(&["fraction", "divide"]),
            "When working with fractions: To add/subtract, find a common denominator. To multiply, multiply numerators and denominators. To divide, multiply by the reciprocal. For example: 1/2 ÷ 1/4 = 1/2 × 4/1 = 4/2 = 2.",
        ),
        Rule::new(
            "algebra",
            Trigger::any_of(&["algebra", "solve for"]),
            "To solve algebraic equations: 1) Simplify both sides, 2) Get variables on one side and constants on the other, 3) Use inverse operations to isolate the variable. For example: 2x + 5 = 11 → 2x = 6 → x = 3.",
        ),
        // Science topics
        Rule::new(
            "photosynthesis",
            Trigger::any_of(&["photosynthesis"]),
            "Photosynthesis is how plants make food using sunlight. Plants take in CO₂ from air and H₂O from soil, then use light energy to create glucose (C₆H₁₂O₆) and release oxygen (O₂). The equation is: 6CO₂ + 6H₂O + light → C₆H₁₂O₆ + 6O₂. This happens in chloroplasts containing chlorophyll.",
        ),
        Rule::new(
            "cell_differences",
            Trigger::all_of(&["cell", "differ"]),
            "Plant and animal cells differ in key ways: Plant cells have cell walls, chloroplasts, and large vacuoles. Animal cells have centrioles and smaller vacuoles. Both have nuclei, mitochondria, cell membranes, and cytoplasm.",
        ),
        Rule::new(
            "gravity",
            Trigger::any_of(&["gravity", "newton"]),
            "Gravity is the force that attracts objects with mass toward each other. Newton's Law of Universal Gravitation states F = G(m₁m₂)/r². On Earth, gravity accelerates objects at 9.8 m/s². This is why objects fall and why planets orbit the sun.",
        ),
        Rule::new(
            "genetics",
            Trigger::any_of(&["dna", "rna"]),
            "DNA (deoxyribonucleic acid) stores genetic information with bases A, T, C, G in a double helix. RNA (ribonucleic acid) uses A, U, C, G in a single strand and helps make proteins. DNA is the blueprint; RNA is the messenger that reads it.",
        ),
        // History topics
        Rule::new(
            "world_war",
            Trigger::any_of(&["world war"]),
            "World War II (1939-1945) was caused by the Treaty of Versailles' harsh terms, rise of totalitarian regimes (Nazi Germany, Fascist Italy, Imperial Japan), economic depression, and failure of the League of Nations. It ended with Allied victory and led to the United Nations' formation.",
        ),
        Rule::new(
            "civil_rights",
            Trigger::any_of(&["civil rights"]),
            "The Civil Rights Movement (1954-1968) fought to end racial segregation and discrimination against African Americans. Key events included Brown v. Board of Education, Montgomery Bus Boycott, March on Washington, and the Civil Rights Act of 1964. Leaders like MLK Jr. advocated nonviolent resistance.",
        ),
        // Writing topics
        Rule::new(
            "thesis",
            Trigger::any_of(&["thesis"]),
            "A thesis statement is your essay's main argument in 1-2 sentences. It should be specific, debatable, and appear at the end of your introduction. For example: 'Social media negatively impacts teen mental health through increased anxiety, depression, and cyberbullying.'",
        ),
        Rule::new(
            "essay",
            Trigger::any_of(&["essay", "paragraph"]),
            "Essay structure: 1) Introduction with hook and thesis, 2) Body paragraphs with topic sentences, evidence, and analysis (3-5 paragraphs), 3) Conclusion restating thesis and main points. Each paragraph should focus on one main idea supporting your thesis.",
        ),
        Rule::new(
            "grammar",
            Trigger::any_of(&["grammar", "punctuation"]),
            "Common grammar rules: Use commas to separate items in lists and after introductory phrases. Use semicolons to connect related independent clauses. Use apostrophes for possessives (John's book) and contractions (don't). Subject-verb agreement is crucial.",
        ),
        // Study and learning
        Rule::new(
            "study",
            Trigger::any_of(&["study", "memorize"]),
            "Effective study techniques: 1) Spaced repetition (review material over increasing intervals), 2) Active recall (test yourself), 3) Pomodoro Technique (25-min focused study, 5-min break), 4) Teach concepts to others, 5) Create mind maps and flashcards. Avoid cramming!",
        ),
        Rule::new(
            "exam",
            Trigger::any_of(&["exam", "test"]),
            "Test preparation tips: Start studying 1-2 weeks early, practice with past papers, focus on weak areas, get enough sleep (8 hours before), eat a good breakfast, arrive early, read instructions carefully, manage time (skip hard questions, return later), and review answers.",
        ),
        Rule::new(
            "focus",
            Trigger::any_of(&["concentrate", "focus"]),
            "To improve concentration: 1) Remove distractions (phone away, quiet space), 2) Use techniques like Pomodoro, 3) Take regular breaks, 4) Stay hydrated and eat healthy, 5) Exercise regularly, 6) Try background music (classical or lo-fi), 7) Set specific goals for each study session.",
        ),
        // General subjects
        Rule::new(
            "math",
            Trigger::any_of(&["math", "calculate"]),
            "I can help with math! Whether it's arithmetic, algebra, geometry, trigonometry, or calculus, I'm here to break down concepts step by step. What specific math topic or problem would you like help with?",
        ),
        Rule::new(
            "science",
            Trigger::any_of(&["science", "biology", "chemistry", "physics"]),
            "Science is fascinating! I can explain concepts in biology (cells, ecosystems, genetics), chemistry (atoms, reactions, periodic table), or physics (forces, energy, motion). What scientific concept would you like to understand better?",
        ),
        Rule::new(
            "history",
            Trigger::any_of(&["history"]),
            "History helps us understand the present! I can discuss ancient civilizations, world wars, civil rights movements, important events, and how they shaped our world. What historical period or event interests you?",
        ),
        Rule::new(
            "english",
            Trigger::any_of(&["english", "literature"]),
            "English and literature! I can help with reading comprehension, literary analysis, themes, symbolism, character development, and writing skills. What book or writing topic are you working on?",
        ),
        // Teacher support
        Rule::new(
            "assessment",
            Trigger::any_of(&["grade", "assess"]),
            "For effective assessment: Create clear rubrics with specific criteria (4-point scale works well). Use a mix of formative (quizzes, discussions) and summative (tests, projects) assessments. Provide timely, constructive feedback. Consider peer assessments and self-reflection activities.",
        ),
        Rule::new(
            "lesson_plan",
            Trigger::any_of(&["lesson plan", "teach"]),
            "Lesson planning tips: 1) Start with clear learning objectives (students will be able to...), 2) Hook students with engaging opener, 3) Use 'I do, We do, You do' model, 4) Include varied activities for different learning styles, 5) Check for understanding throughout, 6) End with reflection/summary.",
        ),
        // Homework and assignments
        Rule::new(
            "homework",
            Trigger::any_of(&["homework", "assignment"]),
            "For homework success: 1) Start early, don't procrastinate, 2) Break large assignments into smaller tasks, 3) Create a schedule working backward from due date, 4) Eliminate distractions, 5) Ask questions if confused, 6) Review work before submitting. What assignment are you working on?",
        ),
    ]
}
