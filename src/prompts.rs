use crate::forms::ToolRequest;

/// Render a validated request into the instruction string sent to the model.
/// Pure string interpolation over one fixed template per tool.
pub fn render(request: &ToolRequest) -> String {
    match request {
        ToolRequest::LessonPlan {
            topic,
            grade_level,
            time_limit,
        } => format!(
            r#"You are an expert curriculum developer for K-12 education. Your task is to create a detailed lesson plan.

Topic: {topic}
Grade Level: {grade_level}
Time Limit: {time_limit} minutes

The lesson plan must include the following sections:
1.  **Learning Objective:** What will students be able to do by the end of the lesson?
2.  **Materials Needed:** A list of all required materials.
3.  **Hook/Engagement (5-10 minutes):** A creative activity to capture students' interest at the start.
4.  **Main Activity/Instruction (20-30 minutes):** The core teaching part of the lesson, with step-by-step instructions.
5.  **Wrap-Up & Assessment (5-10 minutes):** An activity to review the concepts and check for understanding.

Please format the output in a clear, organized, and professional manner using markdown."#
        ),
        ToolRequest::Quiz {
            source_text,
            question_count,
        } => format!(
            r#"You are an experienced teacher writing an assessment. Create {question_count} multiple-choice questions based on the source material below.

Source material:
{source_text}

Each question must have four answer choices (A-D) with exactly one correct answer. List all the questions first, then provide an answer key at the very end.

Please format the output in a clear, organized manner using markdown."#
        ),
        ToolRequest::Concept {
            complex_topic,
            target_audience,
        } => format!(
            r#"You are a friendly teacher who is great at making difficult ideas feel simple. Explain the following concept to {target_audience}.

Concept: {complex_topic}

Use an analogy from everyday life to make the explanation stick, and keep the vocabulary appropriate for the audience.

Please format the output using markdown."#
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_plan_prompt_contains_fields_and_sections() {
        let req = ToolRequest::LessonPlan {
            topic: "The Water Cycle".into(),
            grade_level: "4th Grade".into(),
            time_limit: "45".into(),
        };
        let prompt = render(&req);
        assert!(prompt.contains("The Water Cycle"));
        assert!(prompt.contains("4th Grade"));
        assert!(prompt.contains("45 minutes"));
        for section in [
            "Learning Objective",
            "Materials Needed",
            "Hook/Engagement",
            "Main Activity/Instruction",
            "Wrap-Up & Assessment",
        ] {
            assert!(prompt.contains(section), "missing section: {section}");
        }
    }

    #[test]
    fn quiz_prompt_contains_source_and_count() {
        let req = ToolRequest::Quiz {
            source_text: "The mitochondria is the powerhouse of the cell.".into(),
            question_count: 5,
        };
        let prompt = render(&req);
        assert!(prompt.contains("The mitochondria is the powerhouse of the cell."));
        assert!(prompt.contains("Create 5 multiple-choice questions"));
        assert!(prompt.contains("answer key"));
    }

    #[test]
    fn concept_prompt_contains_fields_and_analogy_instruction() {
        let req = ToolRequest::Concept {
            complex_topic: "Photosynthesis".into(),
            target_audience: "a 5th grader".into(),
        };
        let prompt = render(&req);
        assert!(prompt.contains("Photosynthesis"));
        assert!(prompt.contains("a 5th grader"));
        assert!(prompt.contains("analogy"));
    }

    #[test]
    fn render_is_deterministic() {
        let req = ToolRequest::Concept {
            complex_topic: "Entropy".into(),
            target_audience: "a curious adult".into(),
        };
        assert_eq!(render(&req), render(&req));
    }
}
