// ----------------------------
// Prompt templates
// ----------------------------
pub const PLACEHOLDER: &str = "{prompt}";

const STANDARD_TEMPLATE: &str =
    "Replace the background of the image with: \"{prompt}\". Isolate the subject cleanly.";

const ENHANCED_TEMPLATE: &str = "Photorealistically replace the background with: \"{prompt}\". \
Isolate the subject and match the lighting direction and basic shadows.";

const ULTRA_TEMPLATE: &str = r#"Your task is a master-level, VFX-quality photorealistic background replacement. The final image must be indistinguishable from a photograph shot with a high-end DSLR camera. Adhere to the following professional VFX pipeline:

1.  **Alpha Matting & Edge Refinement:**
    *   Execute a perfect, high-fidelity segmentation of the primary subject.
    *   Generate a soft, precise alpha matte. Pay microscopic attention to fine details: individual hair strands, fabric textures, semi-transparent materials (e.g., glass, thin fabric), and motion blur on edges. The matte should be anti-aliased and feathered naturally.

2.  **Background Generation (Physics-Based):**
    *   Create the new background based on this description: "{prompt}".
    *   The background must be physically accurate, considering the laws of optics. Ensure realistic depth of field, lens distortion, and subtle chromatic aberration consistent with a specific type of camera lens.

3.  **3D Integration & PBR Lighting (CRITICAL):**
    *   **Light Source Analysis:** Identify all primary, secondary, and ambient light sources in the generated background. Analyze their color temperature (Kelvin), intensity, and direction.
    *   **Subject Re-lighting:** Treat the subject as a 3D object. Apply a physically-based rendering (PBR) lighting model. The subject must receive light and cast shadows accurately from *all* identified sources.
    *   **Shadows:** Generate ultra-realistic soft shadows with accurate penumbras. Include subtle contact shadows where the subject meets surfaces. Shadows must inherit color from the ambient light.
    *   **Global Illumination & Color Bleed:** Simulate bounced light. The subject must pick up subtle color reflections (color bleed) from nearby surfaces in the new environment. For example, a subject standing on green grass should have a faint green tint on their downward-facing surfaces.

4.  **Final Compositing & Color Grading:**
    *   **Atmospheric Integration:** Blend the subject with any atmospheric effects in the scene (e.g., fog, haze, volumetric light). The subject's contrast and color saturation should decrease slightly with distance, matching the scene's atmospherics.
    *   **Color Harmony:** Apply professional-level color grading across the entire image (subject and background) to unify them under a single, cohesive color palette. Match the black levels, white points, and mid-tones perfectly.
    *   **Camera Effects:** Introduce a subtle, realistic film grain or sensor noise consistently across the entire image. Ensure the sharpness and focus of the subject perfectly match the background's depth of field.

5.  **Quality Control:**
    *   Scan the final image for any compositing artifacts, hard edges, or lighting inconsistencies. The final output must be a single, flawless, photorealistic image."#;

/// How much compositing work the image model is asked to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RealismLevel {
    Standard,
    Enhanced,
    #[default]
    Ultra,
}

impl RealismLevel {
    pub const ALL: [RealismLevel; 3] = [
        RealismLevel::Standard,
        RealismLevel::Enhanced,
        RealismLevel::Ultra,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RealismLevel::Standard => "Standard",
            RealismLevel::Enhanced => "Enhanced",
            RealismLevel::Ultra => "Ultra",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            RealismLevel::Standard => STANDARD_TEMPLATE,
            RealismLevel::Enhanced => ENHANCED_TEMPLATE,
            RealismLevel::Ultra => ULTRA_TEMPLATE,
        }
    }

    /// Substitutes the first placeholder only; `user_text` is inserted as-is.
    pub fn render(self, user_text: &str) -> String {
        self.template().replacen(PLACEHOLDER, user_text, 1)
    }
}

pub fn enhancement_prompt(short_text: &str) -> String {
    format!(
        "Enhance this simple scene description into a single, highly detailed and photorealistic prompt \
         for an AI image generator. Focus on lighting, atmosphere, and specific details. \
         Do not add any conversational text, just return the enhanced prompt.\n\n\
         SIMPLE DESCRIPTION: \"{short_text}\"\n\n\
         ENHANCED PROMPT:"
    )
}

// ----------------------------
// Loading captions
// ----------------------------
pub const LOADING_INTERVAL_MS: u32 = 2500;

pub const LOADING_MESSAGES: [&str; 6] = [
    "Warming up the AI's creativity...",
    "Analyzing your photo's pixels...",
    "Painting the new background scene...",
    "Adding realistic lighting and shadows...",
    "Blending everything together seamlessly...",
    "Final touches... almost there!",
];

pub fn next_loading_index(current: usize) -> usize {
    (current + 1) % LOADING_MESSAGES.len()
}
