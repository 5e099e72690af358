//! Builtin vocabularies for the background layers.

use glyphfall_core::Token;

/// Terms drifted by the matrix token layer.
pub const TOKEN_WORDS: &[&str] = &[
    "NEURAL",
    "TENSOR",
    "GRADIENT",
    "BACKPROP",
    "ATTENTION",
    "TRANSFORMER",
    "EMBEDDING",
    "TOKENIZER",
    "PROMPT",
    "INFERENCE",
    "LATENT",
    "VECTOR",
    "SEMANTIC",
    "COGNITIVE",
    "PARAMETER",
    "WEIGHT",
    "BIAS",
    "EPOCH",
    "BATCH",
    "OPTIMIZER",
    "DROPOUT",
    "ACTIVATION",
    "CONVOLUTION",
    "POOLING",
    "SOFTMAX",
    "SIGMOID",
    "RELU",
    "DIFFUSION",
    "ALIGNMENT",
    "REASONING",
    "ZERO_SHOT",
    "FEW_SHOT",
    "FINE_TUNE",
    "MULTIMODAL",
    "MATRIX",
    "ALGORITHM",
    "OPTIMIZE",
    "ANALYZE",
    "COMPUTE",
    "EXECUTE",
    "VALIDATE",
    "TRANSFORM",
    "GENERATE",
    "CLASSIFY",
    "PREDICT",
    "FORGE",
    "ENGINE",
    "PROCESS",
];

/// Quotes typed by the narrative layer.
pub const QUOTE_LINES: &[&str] = &[
    "The future belongs to those who understand the language of machines",
    "Every algorithm is a poem written in the syntax of possibility",
    "Code is poetry, data is truth, the bridge between worlds is built from both",
    "Intelligence amplified, creativity unleashed",
    "We are not replacing human intelligence, we are expanding it",
    "The next revolution will be cognitive, not technological",
    "Time is your enemy, speed is your weapon",
    "Precision beats power, timing beats speed",
];

/// Quote shown by the static presentation when motion is disabled.
pub const STATIC_QUOTE: &str =
    "The prompt is the silent key that opens the door exactly where you want to enter";

/// Glyphs cycled by the figure layer.
pub const FIGURE_GLYPHS: &[char] = &[
    '◊', '◆', '▲', '▼', '◄', '►', '●', '◯', '■', '□', '△', '▽', '◈', '◉',
];

/// The token vocabulary as a pool-ready list.
pub fn builtin_tokens() -> Vec<Token> {
    TOKEN_WORDS
        .iter()
        .enumerate()
        .map(|(i, word)| Token::new(i as u32, *word))
        .collect()
}

/// The quote list as a pool-ready list.
pub fn builtin_quotes() -> Vec<Token> {
    QUOTE_LINES
        .iter()
        .enumerate()
        .map(|(i, line)| Token::new(i as u32, *line))
        .collect()
}
