//! Command dispatch seam.
//!
//! Clicking a verb, an exit or a command link produces a command string.
//! The link layer does not parse or run commands; it hands them to a
//! [`CommandSink`] supplied by the host, which is expected to execute the
//! command against the world and advance the turn.

/// Receives commands produced by clicks.
pub trait CommandSink {
    /// Runs one command, e.g. `"Take lamp"` or `"north"`.
    fn run_command(&mut self, command: &str);
}

/// Collects commands in order, for hosts that drain them later.
impl CommandSink for Vec<String> {
    fn run_command(&mut self, command: &str) {
        self.push(command.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(usize);

    impl CommandSink for Counter {
        fn run_command(&mut self, _command: &str) {
            self.0 += 1;
        }
    }

    #[test]
    fn vec_sink_records_in_order() {
        let mut sink: Vec<String> = Vec::new();
        sink.run_command("look");
        sink.run_command("north");
        assert_eq!(sink, vec!["look", "north"]);
    }

    #[test]
    fn sink_is_object_safe() {
        let mut counter = Counter(0);
        let sink: &mut dyn CommandSink = &mut counter;
        sink.run_command("wait");
        assert_eq!(counter.0, 1);
    }
}
