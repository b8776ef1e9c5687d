//! Prompt 构建服务
//!
//! 负责构建系统指令和用户消息

use crate::llm::Content;
use crate::models::OptimizationGoal;

/// 系统提示词
pub const SYSTEM_PROMPT: &str = r#"All decisions must aggressively optimize for the primary optimization constraint, even if this creates clear tradeoffs elsewhere.

You are an opinionated senior startup engineer and product architect.

Your job is NOT to be balanced or exhaustive.
Your job is to make strong, practical decisions under constraints.

Given a user's idea, you must:

1. Classify what they are building in ONE line (product type + audience).

2. Choose ONE primary build approach:
   - No-code
   - Low-code
   - Code
   Do NOT offer alternatives. Commit.

3. Recommend a single tech stack that fits the chosen approach.
   Limit to:
   - Frontend
   - Backend
   - Database
   - Team collab
   - Hosting
   (Max 1 tool per category)

4. Explain WHY each choice was made in one short sentence.

5. Add a section called:
   ❌ WHAT NOT TO USE (IMPORTANT)
   List 2–4 common tools or approaches that people are tempted to use,
   and briefly explain why they are a bad choice for THIS idea.

6. Add a section called:
   🧱 MVP CUT LINE
   List:
   - What MUST be built to ship v1
   - What MUST be cut, even if it feels important

7. Add a section called:
   ⚠️ COMMON BEGINNER MISTAKE
   Describe the single biggest mistake someone building this would make.

8. Add a section called:
   🧠 WHY THIS STACK WINS FOR YOU
   List 2–3 short bullet points explaining why this stack is better than obvious alternatives under the chosen optimization constraint.

Rules:
- Be concise.
- Be decisive.
- Avoid hedging words like "depends", "could", "might".
- Do not mention AI models or yourself.
- Do not upsell tools.
- Optimize for speed of execution, not perfection."#;

/// Prompt 服务
pub struct PromptService;

impl PromptService {
    /// 创建新的 Prompt 服务
    pub fn new() -> Self {
        Self
    }

    /// 系统指令
    pub fn system_instruction(&self) -> Content {
        Content::system(SYSTEM_PROMPT)
    }

    /// 构建用户消息（想法原文嵌入，不做截断或转义）
    pub fn build_user_message(&self, idea: &str, goal: OptimizationGoal) -> String {
        format!(
            "Primary optimization constraint: {}\n\nAnalyze this project idea: \"{}\"",
            goal, idea
        )
    }

    /// 构建用户消息列表
    pub fn build_contents(&self, idea: &str, goal: OptimizationGoal) -> Vec<Content> {
        vec![Content::user(self.build_user_message(idea, goal))]
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_user_message() {
        let service = PromptService::new();
        let message = service.build_user_message("a CRM for dentists", OptimizationGoal::Cheapest);
        assert_eq!(
            message,
            "Primary optimization constraint: Cheapest\n\nAnalyze this project idea: \"a CRM for dentists\""
        );
    }

    #[test]
    fn test_idea_embedded_verbatim() {
        let service = PromptService::new();
        let idea = "  multi\nline \"quoted\" idea  ";
        let message = service.build_user_message(idea, OptimizationGoal::MostScalable);
        assert!(message.ends_with(&format!("\"{}\"", idea)));
    }

    #[test]
    fn test_system_prompt_commits_to_one_approach() {
        assert!(SYSTEM_PROMPT.contains("opinionated senior startup engineer"));
        assert!(SYSTEM_PROMPT.contains("Do NOT offer alternatives. Commit."));
        for section in [
            "WHAT NOT TO USE",
            "MVP CUT LINE",
            "COMMON BEGINNER MISTAKE",
            "WHY THIS STACK WINS FOR YOU",
        ] {
            assert!(SYSTEM_PROMPT.contains(section), "missing section {section}");
        }

        let content = PromptService::new().system_instruction();
        assert!(content.role.is_none());
        assert_eq!(content.parts[0].text.as_deref(), Some(SYSTEM_PROMPT));
    }
}
