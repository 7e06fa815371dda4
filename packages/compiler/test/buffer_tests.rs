use phtml_compiler::lexer::{Buffer, CharStream};

fn buffer(text: &str) -> Buffer<CharStream<'_>> {
    Buffer::new(CharStream::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod lookahead {
        use super::*;

        #[test]
        fn should_peek_without_consuming() {
            let mut buf = buffer("abcdef");
            assert_eq!(buf.peek_char(1), Some('a'));
            assert_eq!(buf.peek_char(3), Some('c'));
            assert_eq!(buf.next().map(|c| c.ch), Some('a'));
        }

        #[test]
        fn should_be_idempotent() {
            let mut buf = buffer("abcdef");
            let first = buf.lookahead_text(4);
            let second = buf.lookahead_text(4);
            assert_eq!(first, "abcd");
            assert_eq!(first, second);
        }

        #[test]
        fn should_return_a_short_run_at_end_of_input() {
            let mut buf = buffer("ab");
            assert_eq!(buf.lookahead_text(5), "ab");
            assert_eq!(buf.lookahead(3), None);
        }
    }

    mod offset {
        use super::*;

        #[test]
        fn should_reflect_the_last_consumed_item() {
            let mut buf = buffer("xyz");
            buf.next();
            buf.next();
            assert_eq!(buf.offset(), 1);
            buf.lookahead(1);
            assert_eq!(buf.offset(), 1);
        }
    }

    mod replay {
        use super::*;

        #[test]
        fn should_reproduce_the_sequence_from_a_prior_offset() {
            let mut buf = buffer("template text");
            for _ in 0..4 {
                buf.next();
            }
            let mark = buf.peek_offset();
            let first_pass = buf.next_bytes();
            buf.replay(mark);
            let second_pass = buf.next_bytes();
            assert_eq!(first_pass, "late text");
            assert_eq!(first_pass, second_pass);
        }

        #[test]
        fn should_replay_from_the_beginning() {
            let mut buf = buffer("abc");
            let all = buf.next_bytes();
            buf.replay(0);
            assert_eq!(buf.next_bytes(), all);
        }
    }

    mod next_bytes {
        use super::*;

        #[test]
        fn should_drain_the_remainder_and_exhaust() {
            let mut buf = buffer("hello");
            buf.next();
            assert_eq!(buf.next_bytes(), "ello");
            assert!(buf.is_eoi());
            assert_eq!(buf.next(), None);
        }
    }
}
