use super::*;

#[test]
fn test_command_names() {
    assert_eq!(Command::CursorLeft.name(), "cursorLeft");
    assert_eq!(Command::NewDocument.name(), "newDocument");
    assert_eq!(Command::Quit.name(), "quit");
    assert_eq!(Command::Custom("myCommand".to_string()).name(), "myCommand");
}

#[test]
fn test_from_name_roundtrips_every_named_command() {
    for cmd in NAMED {
        assert_eq!(&Command::from_name(cmd.name()), cmd);
    }
}

#[test]
fn test_from_name_is_case_insensitive_and_falls_back_to_custom() {
    assert_eq!(Command::from_name(" ToggleTheme "), Command::ToggleTheme);
    assert_eq!(
        Command::from_name("doSomething"),
        Command::Custom("doSomething".to_string())
    );
}

#[test]
fn test_assist_action_mapping() {
    assert_eq!(
        Command::AssistFixGrammar.assist_action(),
        Some(AssistAction::FixGrammar)
    );
    assert_eq!(Command::Quit.assist_action(), None);
}
