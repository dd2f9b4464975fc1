//! Input element `?`
//!
//! Reads one input with the top-input override held for the duration of the
//! read. The override is released by a scope guard, so the context is left
//! as it was found even when the read fails.

use terse_core::{Context, Result, Value};

/// Element `?`
pub fn read_top_input(ctx: &Context) -> Result<Value> {
    tracing::debug!("reading top-level input");
    ctx.with_top_input(|ctx| ctx.get_input())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, Cursor, Read};
    use terse_core::ContextConfig;

    /// Input source that always fails
    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device gone"))
        }
    }

    impl BufRead for Broken {
        fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
            Err(std::io::Error::other("device gone"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    #[test]
    fn test_reads_program_inputs_inside_function() {
        let ctx = Context::with_source(
            ContextConfig::new().with_input(Value::from(7)),
            Cursor::new(String::new()),
        );
        ctx.push_inputs(vec![Value::from(1)]);
        assert_eq!(read_top_input(&ctx).unwrap(), Value::from(7));
        assert!(!ctx.use_top_input());
        assert_eq!(ctx.get_input().unwrap(), Value::from(1));
    }

    #[test]
    fn test_falls_back_to_source() {
        let ctx = Context::with_source(ContextConfig::new(), Cursor::new("3.5\n".to_string()));
        let value = read_top_input(&ctx).unwrap();
        assert_eq!(value.to_string(), "7/2");
    }

    #[test]
    fn test_override_restored_on_failure() {
        let ctx = Context::with_source(ContextConfig::new(), Broken);
        assert!(read_top_input(&ctx).is_err());
        assert!(!ctx.use_top_input());
    }
}
