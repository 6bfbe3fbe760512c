//! Sentiment lexicon
//!
//! Valences on the usual -4..+4 scale for general English vocabulary, with
//! extra coverage of words common in scam, account-security and marketing
//! mail.

/// Word valences
pub const VALENCES: &[(&str, f64)] = &[
    // positive
    ("accept", 1.6),
    ("accepted", 1.1),
    ("admire", 2.4),
    ("advantage", 1.0),
    ("agree", 1.5),
    ("amazing", 2.8),
    ("appreciate", 2.0),
    ("approved", 1.8),
    ("award", 2.5),
    ("awarded", 1.7),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("benefit", 2.0),
    ("best", 3.2),
    ("bless", 1.8),
    ("blessed", 2.9),
    ("bonus", 2.2),
    ("care", 2.2),
    ("celebrate", 2.7),
    ("certain", 1.1),
    ("chance", 1.0),
    ("cheer", 2.3),
    ("clean", 1.7),
    ("comfort", 1.5),
    ("confident", 2.2),
    ("congrats", 2.4),
    ("congratulations", 2.9),
    ("cool", 1.3),
    ("dear", 1.6),
    ("delight", 2.9),
    ("easy", 1.9),
    ("enjoy", 2.2),
    ("excellent", 3.2),
    ("excited", 1.4),
    ("exclusive", 0.5),
    ("fantastic", 2.6),
    ("favor", 1.7),
    ("fine", 0.8),
    ("free", 2.3),
    ("fresh", 1.3),
    ("friend", 2.2),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("generous", 2.3),
    ("gift", 1.9),
    ("glad", 2.0),
    ("good", 1.9),
    ("grant", 1.5),
    ("granted", 1.0),
    ("grateful", 2.0),
    ("great", 3.1),
    ("guarantee", 1.0),
    ("happy", 2.7),
    ("help", 1.7),
    ("helpful", 1.8),
    ("honest", 2.3),
    ("hope", 1.9),
    ("importance", 1.5),
    ("important", 0.8),
    ("improve", 1.9),
    ("interest", 2.0),
    ("interested", 1.7),
    ("joy", 2.8),
    ("kind", 2.4),
    ("like", 2.0),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("lucky", 1.8),
    ("nice", 1.8),
    ("ok", 1.2),
    ("okay", 0.9),
    ("opportunity", 1.8),
    ("perfect", 2.7),
    ("please", 1.3),
    ("pleased", 1.9),
    ("popular", 1.8),
    ("positive", 2.6),
    ("prize", 2.3),
    ("profit", 1.9),
    ("promise", 1.3),
    ("protect", 1.3),
    ("protected", 1.9),
    ("proud", 2.1),
    ("rich", 2.6),
    ("reward", 2.1),
    ("safe", 1.9),
    ("safety", 1.8),
    ("save", 2.2),
    ("secure", 1.4),
    ("smart", 1.7),
    ("special", 1.7),
    ("success", 2.7),
    ("successful", 2.8),
    ("super", 2.9),
    ("support", 1.7),
    ("sure", 1.3),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("top", 0.8),
    ("trust", 2.3),
    ("truth", 1.3),
    ("useful", 1.9),
    ("valuable", 2.1),
    ("welcome", 2.0),
    ("win", 2.8),
    ("winner", 2.8),
    ("winning", 2.4),
    ("wins", 2.7),
    ("won", 2.7),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("yes", 1.7),
    // negative
    ("abuse", -3.2),
    ("alarm", -1.4),
    ("alert", -0.6),
    ("angry", -2.3),
    ("annoy", -1.9),
    ("attack", -2.1),
    ("bad", -2.5),
    ("ban", -2.6),
    ("banned", -2.0),
    ("blocked", -1.2),
    ("broke", -1.8),
    ("cancel", -1.0),
    ("cancelled", -1.0),
    ("charge", -0.5),
    ("cheat", -2.0),
    ("closed", -0.3),
    ("compromised", -1.6),
    ("concern", -0.4),
    ("crime", -2.5),
    ("criminal", -2.4),
    ("danger", -2.4),
    ("dangerous", -2.1),
    ("dead", -3.3),
    ("death", -2.9),
    ("debt", -1.5),
    ("declined", -1.1),
    ("delay", -1.3),
    ("denied", -2.0),
    ("deny", -1.4),
    ("died", -2.6),
    ("disappointed", -1.9),
    ("disaster", -3.1),
    ("error", -1.7),
    ("expire", -0.9),
    ("expired", -1.1),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fake", -2.1),
    ("fear", -2.2),
    ("fraud", -2.8),
    ("fraudulent", -2.3),
    ("hack", -0.4),
    ("hacked", -1.7),
    ("hate", -2.7),
    ("hurt", -2.4),
    ("illegal", -2.6),
    ("kill", -3.7),
    ("killed", -3.5),
    ("limited", -0.9),
    ("lose", -1.6),
    ("loss", -1.3),
    ("lost", -1.3),
    ("miss", -0.6),
    ("mistake", -1.4),
    ("pain", -2.3),
    ("panic", -2.3),
    ("penalty", -2.0),
    ("poor", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("refuse", -1.2),
    ("reject", -1.7),
    ("rejected", -2.3),
    ("risk", -1.1),
    ("sad", -2.1),
    ("scam", -2.7),
    ("scared", -1.9),
    ("sick", -2.3),
    ("sorry", -0.3),
    ("steal", -2.2),
    ("stolen", -2.2),
    ("stop", -1.2),
    ("stupid", -2.4),
    ("suffer", -2.5),
    ("suspend", -1.3),
    ("suspended", -2.1),
    ("suspicious", -1.5),
    ("terrible", -2.1),
    ("theft", -2.4),
    ("threat", -2.4),
    ("trouble", -1.7),
    ("unable", -1.2),
    ("unauthorized", -0.8),
    ("unfortunately", -1.4),
    ("urgent", -0.6),
    ("victim", -1.9),
    ("violation", -2.2),
    ("virus", -2.5),
    ("warn", -0.4),
    ("warning", -1.4),
    ("worry", -1.9),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Words that intensify the following sentiment word
pub const BOOSTERS_INCR: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly",
    "deeply", "enormously", "entirely", "especially", "exceptionally", "extremely",
    "fabulously", "greatly", "highly", "hugely", "incredibly", "intensely", "majorly",
    "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "totally", "tremendously", "truly", "unbelievably", "utterly", "very",
];

/// Words that dampen the following sentiment word
pub const BOOSTERS_DECR: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "kindof", "less", "little", "marginally",
    "occasionally", "partly", "scarcely", "slightly", "somewhat", "sorta",
];

/// Negation words
pub const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont",
    "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "no",
    "nobody", "none", "nope", "nor", "not", "nothing", "nowhere", "shant", "shouldnt",
    "wasnt", "werent", "without", "wont", "wouldnt",
];
