/// Per-process interpreter state. Lives as long as the interpreter; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    silent: bool,
}

impl SessionState {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }
}
