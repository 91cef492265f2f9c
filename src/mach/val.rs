use std::rc::Rc;

/// ## Tagged runtime value
///
/// One stack slot holds either an integer or a text value; assignment
/// re-tags the slot in place, so the same slot can carry either type
/// across different frames. The pair is closed: the parser guarantees
/// every instruction sequence it emits is type-correct, the values
/// themselves enforce nothing.

#[derive(Clone, Debug, PartialEq)]
pub enum Val {
    Integer(i32),
    Text(Rc<str>),
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Integer(n) => write!(f, "{}", n),
            Val::Text(s) => write!(f, "{}", s),
        }
    }
}
