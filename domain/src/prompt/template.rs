//! Prompt templates for the roundtable flow

use crate::discussion::entry::DiscussionEntry;
use crate::meeting::MeetingContext;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the host.
    pub fn host_system(
        host: &str,
        meeting: &MeetingContext,
        specialists: &[String],
        topic: Option<&str>,
    ) -> String {
        let participants = specialists.join(", ");
        let topic_line = topic
            .map(|t| format!("\nDiscussion topic: {}\n", t))
            .unwrap_or_default();

        format!(
            r#"You are {host}, the host of this meeting, responsible for guiding and managing the discussion.

Background:
{info}
Meeting content:
{content}
{topic_line}
Participants: {participants}

As the host you must:
1. In every turn, explicitly invite each participant by name to share their view. Do not leave anyone out.
2. Keep the discussion constructive and on topic.
3. Respect every participant's view, summarize where useful and push the discussion deeper.
4. Keep each turn concise, clear, professional and polite.
5. Speak in the first person and never reveal that you are an AI.

Remember: every turn must name and invite all participants ({participants})."#,
            host = host,
            info = meeting.metadata_summary,
            content = meeting.content,
            topic_line = topic_line,
            participants = participants,
        )
    }

    /// System prompt for a specialist; names the host and every other participant.
    pub fn specialist_system(
        name: &str,
        meeting: &MeetingContext,
        host: &str,
        others: &[String],
    ) -> String {
        let others_line = if others.is_empty() {
            String::from("You are the only other participant.")
        } else {
            format!("Other participants: {}.", others.join(", "))
        };

        format!(
            r#"You are {name}, a participant in this meeting, playing yourself.

Background:
{info}
Meeting content:
{content}

The host is {host}. {others_line}
When the host or another participant asks you a question or calls on you, you must respond.

As {name} you should:
1. Stay consistent with the personality, tone and expertise you showed in the meeting record.
2. Reflect any position, expertise or responsibility the meeting assigns to you.
3. Respond to questions and suggestions from the host and the other participants.
4. Give your own view, including constructive suggestions or criticism.
5. Do not repeat what has already been said; move the discussion forward.
6. Keep replies concise, clear, professional and polite.

Speak in the first person and never reveal that you are an AI."#,
            name = name,
            info = meeting.metadata_summary,
            content = meeting.content,
            host = host,
            others_line = others_line,
        )
    }

    /// Host instruction for the opening round.
    pub fn host_opening_instruction(topic: Option<&str>, specialists: &[String]) -> String {
        let names = specialists.join(", ");
        match topic {
            Some(topic) => format!(
                "As the host, guide the participants through the following topic: {}. \
                 In your turn you must invite each participant ({}) by name to share their view. \
                 Keep it natural and engaging, and make sure everyone takes part.",
                topic, names
            ),
            None => format!(
                "As the host, guide the participants into a deeper discussion of the key issues \
                 raised in the meeting. In your turn you must invite each participant ({}) by name \
                 to share their view. Keep it natural and engaging, and make sure everyone takes part.",
                names
            ),
        }
    }

    /// Host instruction for every round after the first.
    pub fn host_followup_instruction(specialists: &[String], least_active: &[String]) -> String {
        let mut instruction = format!(
            "As the host, briefly summarize the discussion so far and keep it going. \
             Invite each participant ({}) by name to share further thoughts on the topic, \
             and make sure everyone takes a full part",
            specialists.join(", ")
        );
        if least_active.is_empty() || least_active.len() == specialists.len() {
            instruction.push_str(", especially those who have said little so far.");
        } else {
            instruction.push_str(&format!(
                ", especially {}, who have said the least so far.",
                least_active.join(", ")
            ));
        }
        instruction
    }

    /// Instruction appended to a specialist's context when their turn comes.
    pub fn specialist_invitation(host: &str, name: &str) -> String {
        format!(
            "Host {} invites you ({}) to share your view. Respond to the host's question with your perspective.",
            host, name
        )
    }

    /// System prompt for the closing summarizer.
    pub fn summary_system() -> &'static str {
        r#"You are a professional minute-taker. Summarize the discussion provided. The summary should cover:
1. The main topics and issues discussed
2. An overview of each party's views
3. Any consensus or conclusions reached
4. Questions that need further discussion
5. Agreed next steps and action items

Keep it clear, concise and objective, roughly 300 to 500 words. Write in the third person without personal commentary."#
    }

    /// User input for the closing summarizer: meeting information followed by
    /// every non-system entry as `role: content`.
    pub fn summary_input(meeting_info: &str, entries: &[DiscussionEntry]) -> String {
        let mut input = String::from("Background:\n");
        input.push_str(meeting_info);
        input.push_str("\n\nDiscussion record:\n");

        for entry in entries.iter().filter(|e| !e.is_system()) {
            input.push_str(&format!("{}: {}\n\n", entry.role(), entry.content()));
        }

        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discussion::entry::EntryDraft;

    fn meeting() -> MeetingContext {
        MeetingContext::new("We reviewed the launch plan.", "Meeting information:\nTitle: Launch\n")
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn host_prompt_names_everyone() {
        let prompt = PromptTemplate::host_system(
            "Mia",
            &meeting(),
            &names(&["Ana", "Ben"]),
            Some("pricing"),
        );
        assert!(prompt.contains("You are Mia"));
        assert!(prompt.contains("Ana, Ben"));
        assert!(prompt.contains("Discussion topic: pricing"));
        assert!(prompt.contains("We reviewed the launch plan."));
    }

    #[test]
    fn specialist_prompt_names_other_participants() {
        let prompt =
            PromptTemplate::specialist_system("Ana", &meeting(), "Mia", &names(&["Ben", "Cy"]));
        assert!(prompt.contains("You are Ana"));
        assert!(prompt.contains("The host is Mia"));
        assert!(prompt.contains("Other participants: Ben, Cy."));
    }

    #[test]
    fn opening_instruction_depends_on_topic() {
        let with_topic = PromptTemplate::host_opening_instruction(Some("hiring"), &names(&["Ana"]));
        assert!(with_topic.contains("hiring"));
        let without = PromptTemplate::host_opening_instruction(None, &names(&["Ana"]));
        assert!(without.contains("key issues"));
        assert!(without.contains("(Ana)"));
    }

    #[test]
    fn followup_emphasizes_least_active() {
        let all = names(&["Ana", "Ben"]);
        let text = PromptTemplate::host_followup_instruction(&all, &names(&["Ben"]));
        assert!(text.contains("especially Ben"));

        let text = PromptTemplate::host_followup_instruction(&all, &all);
        assert!(text.contains("those who have said little"));
    }

    #[test]
    fn summary_input_skips_system_entries() {
        let entries = vec![
            EntryDraft::start().into_entry(0),
            EntryDraft::contribution("Mia", "Welcome").into_entry(1),
            EntryDraft::handoff("Ana").into_entry(2),
            EntryDraft::contribution("Ana", "Thanks").into_entry(3),
        ];
        let input = PromptTemplate::summary_input("Meeting information:\n", &entries);
        assert!(input.contains("Mia: Welcome\n\nAna: Thanks\n\n"));
        assert!(!input.contains("will speak next"));
        assert!(!input.contains("started"));
    }
}
