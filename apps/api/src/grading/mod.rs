// Interview grading pipeline.
// Implements: request validation, grading payload assembly, the call to the
// AI grading backend, score normalization, persistence onto the assessment.
// All LLM traffic goes through llm_client — no direct API calls here.

pub mod grader;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod payload;
pub mod prompts;
