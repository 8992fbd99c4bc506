//! Prompt builders for the text and image calls.

use crate::domain::profile::{SpecificPartnerDetails, UserProfile};

use super::ArchetypeResult;

/// Prompt for the ideal-partner archetype reading.
pub fn archetype_prompt(user: &UserProfile) -> String {
    format!(
        r#"You are AuraMatch, an AI psychologist and mystic. Analyze the user profile below and predict their ideal archetypal partner.

User Profile: {profile}
The user is seeking a {preference} partner.

Frameworks to apply:
1. Barnum Effect: make 'psychologicalMatch' and 'reasoning' feel personal to this user's data (Zodiac: {zodiac}, Stress: {stress}) while staying universally resonant.
2. Halo Effect: in 'physiologicalMatch', describe physical traits that signal health, intelligence, and kindness.
3. Sternberg's Triangular Theory: balance intimacy, passion, and commitment in 'loveFramework'.
4. Cognitive Fluency: use clear, evocative language that is easy to visualize.

Task 1 - The Ideal Match (Light):
Ground the archetype in the user's own concepts ({traits}) and specific traits.

Task 2 - The Shadow Match (Dark):
Read the user's stress reaction, logic/emotion balance, and introvert/extrovert scale.
Identify what they repress and therefore attract (Jungian shadow), and describe the partner they are drawn to through projection or unhealed wounds.

Output JSON matching the schema. Set 'mode' to 'archetype'."#,
        profile = user.to_prompt_json(),
        preference = user.gender_preference,
        zodiac = user.zodiac,
        stress = user.stress_reaction,
        traits = user.partner_traits_preference,
    )
}

/// Prompt for the compatibility reading against a specific partner.
pub fn measure_prompt(user: &UserProfile, partner: &SpecificPartnerDetails) -> String {
    format!(
        r#"You are AuraMatch. Measure the compatibility between the User and a Potential Partner.

User Profile: {profile}

Potential Partner Details:
{partner}

Task:
1. Act as a high-precision love calculator. Users overestimate compatibility; give an objective reality check.
2. Weigh name compatibility, age-gap dynamics, and belief-system alignment.
3. Make 'dynamicAnalysis' and 'potentialChallenges' concrete, actionable advice.
4. Cross-reference the partner's details against what the user asked for:
   - User's desired traits: "{traits}"
   - User's bio and interests: "{bio}"
   If the partner contradicts these desires, lower 'successProbability' significantly and say why. If they align, raise it.
5. Compare the user's stress reaction ({stress}) with the partner's inferred temperament.
6. Put the relationship in exactly one status:
   - Marriage Material: long-term potential, shared values, stability.
   - Casual Connection: high passion, low commitment, fun but fleeting.
   - Situationship: ambiguous, emotional but lacking structure.
   - Need-Based / Transactional: fills a void rather than genuine synergy.
   - Karmic Lesson: intense, volatile, meant for growth but likely to end.
7. Score Sternberg's love components for the inferred dynamic.

Output JSON matching the schema. Set 'mode' to 'measure'."#,
        profile = user.to_prompt_json(),
        partner = partner.to_prompt_block(),
        traits = user.partner_traits_preference,
        bio = user.additional_details,
        stress = user.stress_reaction,
    )
}

/// Square portrait prompt assembled from the archetype's text fields.
pub fn portrait_prompt(archetype: &ArchetypeResult) -> String {
    format!(
        r#"A hyper-realistic, cinematic portrait of a {gender} {occupation}.
Physical appearance: {physique}.
Age: approx {age}.
Style: mystical, ethereal, high fashion, soft lighting, highly detailed face.
Mood: dreamy, romantic, destined.
Background: abstract nebula or soft-focus aura.
Frame the face to convey intellect and personality."#,
        gender = archetype.gender,
        occupation = archetype.occupation,
        physique = archetype.physiological_match,
        age = archetype.estimated_age,
    )
}
