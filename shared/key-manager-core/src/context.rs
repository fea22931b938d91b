//! Reentrancy bookkeeping for one invocation.

use core::ops::{Deref, DerefMut};

use alloy_primitives::Address;

use crate::host::Host;

/// Who the key manager is currently forwarding for, and how deeply nested that forward is.
///
/// `depth == 0` means no forward is in flight: a call arriving in this state is a fresh
/// top-level call, anything else is a re-entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    pub controller: Address,
    pub depth: u32,
}

impl ExecutionContext {
    pub fn is_reentrant(&self) -> bool {
        self.depth > 0
    }
}

/// Scoped forward: entering bumps the depth and records the acting controller, dropping
/// restores the outer context whatever the exit path.
pub struct ExecutionGuard<'a, H: Host> {
    host: &'a mut H,
    outer: ExecutionContext,
}

impl<'a, H: Host> ExecutionGuard<'a, H> {
    pub fn enter(host: &'a mut H, controller: Address) -> Self {
        let outer = host.execution_context();
        host.set_execution_context(ExecutionContext {
            controller,
            depth: outer.depth.saturating_add(1),
        });
        Self { host, outer }
    }
}

impl<H: Host> Deref for ExecutionGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: Host> DerefMut for ExecutionGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: Host> Drop for ExecutionGuard<'_, H> {
    fn drop(&mut self) {
        self.host.set_execution_context(self.outer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestHost;

    #[test]
    fn test_guard_nests_and_restores() {
        let mut host = TestHost::default();
        let alice = Address::repeat_byte(0xa1);
        let bob = Address::repeat_byte(0xb0);

        {
            let mut outer = ExecutionGuard::enter(&mut host, alice);
            assert_eq!(outer.execution_context().depth, 1);
            {
                let inner = ExecutionGuard::enter(&mut *outer, bob);
                assert_eq!(
                    inner.execution_context(),
                    ExecutionContext {
                        controller: bob,
                        depth: 2
                    }
                );
            }
            assert_eq!(outer.execution_context().controller, alice);
            assert!(outer.execution_context().is_reentrant());
        }
        assert_eq!(host.execution_context(), ExecutionContext::default());
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        fn fails(host: &mut TestHost) -> Result<(), ()> {
            let _guard = ExecutionGuard::enter(host, Address::repeat_byte(0x01));
            Err(())
        }
        let mut host = TestHost::default();
        assert!(fails(&mut host).is_err());
        assert!(!host.execution_context().is_reentrant());
    }
}
