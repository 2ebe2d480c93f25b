//! Integration tests for the shell and the shop commands

use std::collections::VecDeque;
use std::rc::Rc;

use parley_foundation::{Identity, MessageLog, MessageSink, NO_PERMISSION_MESSAGE, Result};
use parley_runtime::{Flow, LineEditor, ReadResult, Shell, complete_line, shop_commands};

/// Feeds scripted input to the shell.
struct ScriptedEditor {
    inputs: VecDeque<ReadResult>,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            inputs: lines
                .iter()
                .map(|line| ReadResult::Line((*line).to_string()))
                .collect(),
        }
    }

    fn with_interrupt(mut self) -> Self {
        self.inputs.push_front(ReadResult::Interrupted);
        self
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.inputs.pop_front().unwrap_or(ReadResult::Eof))
    }

    fn add_history(&mut self, _line: &str) {}
}

fn shell(editor: ScriptedEditor, invoker: Identity) -> (Shell<ScriptedEditor>, Rc<MessageLog>) {
    let (tree, _) = shop_commands(vec!["Alice".to_string(), "Bob".to_string()]).unwrap();
    let log = Rc::new(MessageLog::new());
    let shell = Shell::with_editor(editor, Rc::new(tree), Rc::new(invoker))
        .without_banner()
        .with_sink(Rc::clone(&log) as Rc<dyn MessageSink>);
    (shell, log)
}

#[test]
fn session_changes_shared_state() {
    let editor = ScriptedEditor::new(&[
        "/shop price bread",
        "/shop price bread price=5",
        "/shop price bread",
        "/shop give alice 3",
        "/shop give alice 4",
    ])
    .with_interrupt();
    let (mut shell, log) = shell(editor, Identity::console());
    shell.run().unwrap();

    assert_eq!(
        log.messages(),
        vec![
            "Price of bread: 2",
            "Price of bread set to 5.",
            "Price of bread: 5",
            "Gave 3 to Alice. Balance: 3.",
            "Gave 4 to Alice. Balance: 7.",
        ]
    );
}

#[test]
fn player_session() {
    let (shell, log) = shell(ScriptedEditor::new(&[]), Identity::player("Bob"));
    assert_eq!(shell.execute("s list 2"), Flow::Continue);
    assert_eq!(shell.execute("s reload"), Flow::Continue);
    assert_eq!(shell.execute("s price bread price=-1"), Flow::Continue);

    assert_eq!(
        log.messages(),
        vec![
            "Page 2 does not exist.",
            NO_PERMISSION_MESSAGE,
            "Invalid price: price=-1",
        ]
    );
}

#[test]
fn console_must_name_a_player() {
    let (shell, log) = shell(ScriptedEditor::new(&[]), Identity::console());
    shell.execute("/shop list 123 1");
    assert_eq!(log.messages(), vec!["Invalid target: 123"]);
}

#[test]
fn completion_through_the_shell() {
    let (shell, _) = shell(ScriptedEditor::new(&[]), Identity::console());
    assert_eq!(
        complete_line(shell.tree(), shell.invoker(), "/shop list a"),
        vec!["all", "admin", "Alice"]
    );
    assert_eq!(complete_line(shell.tree(), shell.invoker(), "/shop re"), vec!["reload"]);
}
