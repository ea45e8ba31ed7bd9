//! Bracket structure of a template expression.
//!
//! A character-level stack machine over the whitespace-collapsed expression:
//! `<` opens the first argument of the current name, `,` closes an argument
//! and opens its sibling, `>` closes the argument list. Spaces are skipped
//! and every other character extends the current name. A comment region is
//! attached to the node most recently named or closed.

use super::SourceParseError;
use super::preprocess::{COMMENT_END, COMMENT_START};

/// One template name with its written arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedNode {
    pub name: String,
    pub comment: String,
    /// Written with angle brackets, possibly empty (`Name<>`)
    pub can_have_children: bool,
    pub children: Vec<ParsedNode>,
}

#[derive(Default)]
struct Frame {
    name: String,
    comment: String,
    can_have_children: bool,
    children: Vec<usize>,
}

/// Parse the expression into its single top-level node
pub fn parse_expression(expression: &str) -> Result<ParsedNode, SourceParseError> {
    let wrapped = format!("<{expression}>");
    let mut frames = vec![Frame::default()];
    let mut stack = vec![0usize];
    let mut comment_target = 0usize;
    let mut in_comment = false;

    for (index, ch) in wrapped.char_indices() {
        // position inside the unwrapped expression
        let offset = index.saturating_sub(1);
        if in_comment {
            if ch == COMMENT_END {
                in_comment = false;
            } else {
                frames[comment_target].comment.push(ch);
            }
            continue;
        }

        match ch {
            ' ' | COMMENT_END => {}
            COMMENT_START => in_comment = true,
            '<' => {
                let top = current(&stack, offset)?;
                frames[top].can_have_children = true;
                let child = open_child(&mut frames, top);
                stack.push(child);
                comment_target = child;
            }
            ',' => {
                let finished = close(&mut stack, offset)?;
                check_named(&frames, finished, offset)?;
                let top = current(&stack, offset)?;
                let sibling = open_child(&mut frames, top);
                stack.push(sibling);
                comment_target = finished;
            }
            '>' => {
                let finished = close(&mut stack, offset)?;
                let top = current(&stack, offset)?;
                if let [only] = frames[top].children[..] {
                    if frames[only].name.is_empty() && frames[only].children.is_empty() {
                        frames[top].children.clear();
                    }
                }
                if frames[top].children.contains(&finished) {
                    check_named(&frames, finished, offset)?;
                }
                comment_target = top;
            }
            _ => {
                let top = current(&stack, offset)?;
                frames[top].name.push(ch);
                comment_target = top;
            }
        }
    }

    if stack.len() != 1 {
        return Err(SourceParseError::UnbalancedBrackets {
            offset: expression.len(),
        });
    }

    let mut top_level = frames[0].children.clone();
    match top_level.len() {
        0 => Err(SourceParseError::EmptyExpression),
        1 => Ok(build(&frames, top_level.remove(0))),
        count => Err(SourceParseError::MultipleTopLevel { count }),
    }
}

fn open_child(frames: &mut Vec<Frame>, parent: usize) -> usize {
    let child = frames.len();
    frames.push(Frame::default());
    frames[parent].children.push(child);
    child
}

fn current(stack: &[usize], offset: usize) -> Result<usize, SourceParseError> {
    stack
        .last()
        .copied()
        .ok_or(SourceParseError::UnbalancedBrackets { offset })
}

fn close(stack: &mut Vec<usize>, offset: usize) -> Result<usize, SourceParseError> {
    // the wrapper frame at the bottom is never closed by the expression
    if stack.len() <= 1 {
        return Err(SourceParseError::UnbalancedBrackets { offset });
    }
    stack
        .pop()
        .ok_or(SourceParseError::UnbalancedBrackets { offset })
}

fn check_named(frames: &[Frame], index: usize, offset: usize) -> Result<(), SourceParseError> {
    if frames[index].name.is_empty() {
        return Err(SourceParseError::EmptyArgument { offset });
    }
    Ok(())
}

fn build(frames: &[Frame], index: usize) -> ParsedNode {
    let frame = &frames[index];
    ParsedNode {
        name: frame.name.clone(),
        comment: frame.comment.trim_end().to_string(),
        can_have_children: frame.can_have_children,
        children: frame
            .children
            .iter()
            .map(|&child| build(frames, child))
            .collect(),
    }
}
