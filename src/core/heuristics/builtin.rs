//! The stock heuristic table. Order matters: the first rule whose keyword
//! appears in the input wins.

pub(super) struct BuiltinRule {
    pub id: &'static str,
    pub keywords: &'static [&'static str],
    pub narrative: &'static str,
    pub steps: &'static [&'static str],
}

pub(super) const BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        id: "planning",
        keywords: &["plan", "roadmap", "milestone", "strategy"],
        narrative: "This reads as a planning problem: the outcome matters less than the order we get there in, so I'll frame goals first and work backwards into milestones.",
        steps: &[
            "Clarify success metrics and guardrails",
            "Sequence milestones with resource sizing",
            "Highlight dependencies and risk mitigations",
        ],
    },
    BuiltinRule {
        id: "research",
        keywords: &["research", "analy", "compare", "investigate", "benchmark"],
        narrative: "You're asking for an investigation, so I'll separate what we already know from what still needs evidence before drawing conclusions.",
        steps: &[
            "Frame the key questions and decision criteria",
            "Gather comparable sources and data points",
            "Synthesize findings into a ranked recommendation",
        ],
    },
    BuiltinRule {
        id: "engineering",
        keywords: &["bug", "debug", "error", "refactor", "code", "deploy"],
        narrative: "This is an engineering task; I'll reproduce the behaviour, narrow the failing surface, and keep changes small enough to verify.",
        steps: &[
            "Reproduce the issue with a minimal case",
            "Isolate the failing component and root cause",
            "Ship a fix with regression coverage",
        ],
    },
    BuiltinRule {
        id: "writing",
        keywords: &["write", "draft", "email", "copy", "blog"],
        narrative: "This is a writing request, so audience and tone come first; structure follows from what the reader needs to do next.",
        steps: &[
            "Pin down audience, tone, and call to action",
            "Outline the key points in reading order",
            "Draft, then tighten for clarity and length",
        ],
    },
];

pub(super) const FALLBACK_RULE: BuiltinRule = BuiltinRule {
    id: "general",
    keywords: &[],
    narrative: "I'll break this request into its moving parts and work through them one at a time.",
    steps: &[
        "Restate the goal and constraints",
        "Break the work into manageable pieces",
        "Deliver a first pass and iterate on feedback",
    ],
};
