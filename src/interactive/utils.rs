use std::str::FromStr;

use super::Prompter;

pub fn prompt_text_handle_errors<T, P>(
    prompter: &mut P,
    prompt: &str,
) -> eyre::Result<T>
where
    P: Prompter,
    T: FromStr,
    <T as FromStr>::Err: std::error::Error,
{
    loop {
        let t = prompter.text(prompt, None)?;

        match t.trim().parse() {
            Ok(t) => return Ok(t),
            Err(e) => {
                prompter.notify(&format!("Error: {}", e));
                continue;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{Answer, ScriptedPrompter};
    use super::*;

    #[test]
    fn reprompts_until_parse_succeeds() {
        let mut prompter = ScriptedPrompter::new([
            Answer::text("twelve"),
            Answer::text(" 12 "),
        ]);

        let value: u64 =
            prompt_text_handle_errors(&mut prompter, "Number:").unwrap();

        assert_eq!(value, 12);
        assert_eq!(prompter.notices.len(), 1);
        assert!(prompter.notices[0].starts_with("Error: "));
    }
}
