//! Scoped hiding of the page chrome

use std::rc::Rc;

use crate::ports::outbound::PageChromePort;

/// Hides the page chrome for as long as it is alive
///
/// Restoring happens in `Drop`, so every exit path (stop, unmount, an unwinding
/// panic) puts the chrome back.
pub struct ChromeLease {
    chrome: Rc<dyn PageChromePort>,
}

impl ChromeLease {
    pub fn acquire(chrome: Rc<dyn PageChromePort>) -> Self {
        chrome.set_chrome_hidden(true);
        tracing::debug!("Page chrome hidden");
        Self { chrome }
    }
}

impl Drop for ChromeLease {
    fn drop(&mut self) {
        self.chrome.set_chrome_hidden(false);
        tracing::debug!("Page chrome restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockPageChromePort;
    use mockall::Sequence;

    #[test]
    fn test_lease_hides_then_restores() {
        let mut seq = Sequence::new();
        let mut chrome = MockPageChromePort::new();
        chrome
            .expect_set_chrome_hidden()
            .withf(|hidden| *hidden)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        chrome
            .expect_set_chrome_hidden()
            .withf(|hidden| !*hidden)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let lease = ChromeLease::acquire(Rc::new(chrome));
        drop(lease);
    }
}
