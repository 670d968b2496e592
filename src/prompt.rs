//! Builds the instruction text sent to the image model.

use crate::options::StyleStrength;

/// Always leads the prompt.
pub const SAFETY_CLAUSE: &str = "Do not include trademarks, logos or copyrighted character likenesses. \
Preserve identity and pose; translate facial features into toy-like equivalents. ";

const BASE_DESCRIPTION: &str = "Transform the entire scene into a whimsical knitted burlap plush aesthetic. \
Preserve subject identity and composition. Add soft stitched seams, yarn details, button-like eyes where appropriate, felt textures, and a cozy miniature craft-world look. \
Keep proportions toy-like and charming. Maintain lighting from the original image. High detail, clean edges, photorealistic craft materials, no text.";

/// Appended when a diorama background is requested.
pub const DIORAMA_CLAUSE: &str = " Set within a handcrafted tabletop diorama of felt, cardboard, yarn and soft bokeh lights; coherent shadows; consistent perspective.";

/// Modifier for a given strength.
pub fn strength_clause(strength: StyleStrength) -> &'static str {
    match strength {
        StyleStrength::Low => " Subtle stylisation.",
        StyleStrength::Medium => " Moderate stylisation.",
        StyleStrength::High => " Strong stylisation with highly pronounced knit and stitch textures.",
    }
}

/// Builds the plush-craft prompt for the given options.
pub fn build_prompt(strength: StyleStrength, diorama: bool) -> String {
    let mut prompt = String::with_capacity(
        SAFETY_CLAUSE.len() + BASE_DESCRIPTION.len() + DIORAMA_CLAUSE.len() + 80,
    );
    prompt.push_str(SAFETY_CLAUSE);
    prompt.push_str(BASE_DESCRIPTION);
    prompt.push_str(strength_clause(strength));
    if diorama {
        prompt.push_str(DIORAMA_CLAUSE);
    }
    prompt
}
