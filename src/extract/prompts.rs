//! Fixed instruction prompts for the two routes.

/// Prescription route: strict JSON list of medicine/strength pairs.
pub const PRESCRIPTION_PROMPT: &str = "\
You are an expert pharmacist AI. Analyze this handwritten prescription image. \
Identify all medicines and their strengths. \
Return strict JSON: { \"medicines\": [ { \"name\": \"Name\", \"strength\": \"500mg\" } ] }";

/// Box route: four named fields, keys exactly as listed.
pub const BOX_PROMPT: &str = "\
Analyze medicine box. Find: medicineName, strength, expiryDate, manufacturingDate. \
Return JSON keys exactly as listed. \
Use \"Not Detected\" for any field that is not visible.";
