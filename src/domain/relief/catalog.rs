//! Static intervention catalog.
//!
//! Concrete interventions per category and the mapping from stress categories
//! to the intervention categories preferred for them. The catalog is fixed at
//! compile time; ordering within a category is significant.

use super::{Intervention, InterventionCategory, StressCategory};

const RELAXATION: &[Intervention] = &[
    Intervention {
        name: "60-second breathing",
        link: "https://www.youtube.com/watch?v=Dx112W4i5I0",
        description: "A brief guided breathing exercise designed to reduce stress and promote relaxation.",
        category: InterventionCategory::Relaxation,
    },
    Intervention {
        name: "Box Breathing",
        link: "https://www.youtube.com/watch?v=tEmt1Znux58",
        description: "A simple relaxation technique involving four-second intervals of inhaling, holding, exhaling, and holding the breath to calm feelings of stress or anxiety.",
        category: InterventionCategory::Relaxation,
    },
    Intervention {
        name: "Muscle Relaxation",
        link: "https://youtu.be/ClqPtWzozXs?t=69",
        description: "A progressive muscle relaxation exercise that helps release physical tension and promote a sense of calm.",
        category: InterventionCategory::Relaxation,
    },
];

const REAPPRAISAL: &[Intervention] = &[Intervention {
    name: "Script from Wiley SMI",
    link: "https://onlinelibrary.wiley.com/doi/full/10.1002/smi.2759",
    description: "A guided cognitive reappraisal script to help reinterpret negative experiences objectively, fostering emotional resilience.",
    category: InterventionCategory::Reappraisal,
}];

const POSITIVE_EXPERIENCES: &[Intervention] = &[
    Intervention {
        name: "Funny Animal Video",
        link: "https://www.youtube.com/watch?v=rzr6Zv6Mfbs",
        description: "A short, uplifting video featuring humorous animal antics to boost mood and alleviate stress.",
        category: InterventionCategory::PositiveExperiences,
    },
    Intervention {
        name: "Guided Imagery",
        link: "https://www.youtube.com/watch?v=QtE00VP4W3Y",
        description: "A quick guided meditation focusing on visualization to help reset and refocus the mind.",
        category: InterventionCategory::PositiveExperiences,
    },
];

const GRATITUDE: &[Intervention] = &[Intervention {
    name: "2-min Gratitude Meditation",
    link: "https://www.youtube.com/watch?v=OCorElLKFQE",
    description: "A brief meditation encouraging reflection on aspects of life you're grateful for, aimed at enhancing mood.",
    category: InterventionCategory::Gratitude,
}];

const RESOURCE_BUFFERS: &[Intervention] = &[
    Intervention {
        name: "Self-Affirmation Video",
        link: "https://www.youtube.com/watch?v=qANaxInPFh0",
        description: "A short video promoting self-kindness and positive self-talk to reinforce self-worth.",
        category: InterventionCategory::ResourceBuffers,
    },
    Intervention {
        name: "Best Possible Self",
        link: "https://www.youtube.com/watch?v=G_jEsnDEIa0",
        description: "An exercise guiding you to envision your ideal future self, fostering optimism and motivation.",
        category: InterventionCategory::ResourceBuffers,
    },
];

/// Preferred categories when the stress category could not be classified.
pub const DEFAULT_PREFERRED: &[InterventionCategory] = &[
    InterventionCategory::Relaxation,
    InterventionCategory::PositiveExperiences,
];

/// Returns the ordered interventions of a category.
pub fn interventions(category: InterventionCategory) -> &'static [Intervention] {
    match category {
        InterventionCategory::Relaxation => RELAXATION,
        InterventionCategory::Reappraisal => REAPPRAISAL,
        InterventionCategory::PositiveExperiences => POSITIVE_EXPERIENCES,
        InterventionCategory::Gratitude => GRATITUDE,
        InterventionCategory::ResourceBuffers => RESOURCE_BUFFERS,
    }
}

/// Returns the intervention categories preferred for a stress category.
pub fn preferred_categories(stress: StressCategory) -> &'static [InterventionCategory] {
    match stress {
        StressCategory::Anxiety => &[
            InterventionCategory::Relaxation,
            InterventionCategory::ResourceBuffers,
        ],
        StressCategory::Sadness => &[
            InterventionCategory::Gratitude,
            InterventionCategory::PositiveExperiences,
        ],
        StressCategory::Anger => &[
            InterventionCategory::Reappraisal,
            InterventionCategory::Relaxation,
        ],
        StressCategory::Overwhelm => &[
            InterventionCategory::Relaxation,
            InterventionCategory::ResourceBuffers,
        ],
        StressCategory::General => &[
            InterventionCategory::PositiveExperiences,
            InterventionCategory::Gratitude,
        ],
    }
}

/// Looks up an intervention by name.
pub fn find_by_name(name: &str) -> Option<&'static Intervention> {
    InterventionCategory::ALL
        .iter()
        .flat_map(|c| interventions(*c).iter())
        .find(|i| i.name == name)
}
