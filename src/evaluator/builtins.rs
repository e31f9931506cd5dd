//! The fixed builtin table.
//!
//! Every failure here is a language-level error object, never a host fault:
//! wrong arity and wrong argument kinds both report through `RuntimeError`.

use crate::console::Console;
use crate::value::error::RuntimeError;
use crate::value::{Builtin, Object, NULL};
use std::rc::Rc;

pub static BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        function: len,
    },
    Builtin {
        name: "first",
        function: first,
    },
    Builtin {
        name: "last",
        function: last,
    },
    Builtin {
        name: "rest",
        function: rest,
    },
    Builtin {
        name: "push",
        function: push,
    },
    Builtin {
        name: "puts",
        function: puts,
    },
];

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

fn expect_arity(args: &[Object], want: usize) -> Result<(), RuntimeError> {
    if args.len() == want {
        Ok(())
    } else {
        Err(RuntimeError::WrongArgumentCount {
            got: args.len(),
            want,
        })
    }
}

/// String byte length or array element count.
fn len(_console: &mut dyn Console, args: Vec<Object>) -> Result<Object, RuntimeError> {
    expect_arity(&args, 1)?;
    match &args[0] {
        Object::String(value) => Ok(Object::Integer(value.len() as i64)),
        Object::Array(elements) => Ok(Object::Integer(elements.len() as i64)),
        other => Err(RuntimeError::UnsupportedLenArgument(other.kind())),
    }
}

fn first(_console: &mut dyn Console, args: Vec<Object>) -> Result<Object, RuntimeError> {
    expect_arity(&args, 1)?;
    match &args[0] {
        Object::Array(elements) => Ok(elements.first().cloned().unwrap_or(NULL)),
        other => Err(RuntimeError::ExpectedArrayArgument {
            name: "first",
            actual: other.kind(),
        }),
    }
}

fn last(_console: &mut dyn Console, args: Vec<Object>) -> Result<Object, RuntimeError> {
    expect_arity(&args, 1)?;
    match &args[0] {
        Object::Array(elements) => Ok(elements.last().cloned().unwrap_or(NULL)),
        other => Err(RuntimeError::ExpectedArrayArgument {
            name: "last",
            actual: other.kind(),
        }),
    }
}

/// A new array of everything but the first element; `null` when empty.
fn rest(_console: &mut dyn Console, args: Vec<Object>) -> Result<Object, RuntimeError> {
    expect_arity(&args, 1)?;
    match &args[0] {
        Object::Array(elements) => {
            if elements.is_empty() {
                Ok(NULL)
            } else {
                Ok(Object::Array(Rc::new(elements[1..].to_vec())))
            }
        }
        other => Err(RuntimeError::ExpectedArrayArgument {
            name: "rest",
            actual: other.kind(),
        }),
    }
}

/// A new array with the element appended; the input array is untouched.
fn push(_console: &mut dyn Console, args: Vec<Object>) -> Result<Object, RuntimeError> {
    expect_arity(&args, 2)?;
    let mut args = args.into_iter();
    let array = args.next().expect("arity checked");
    let element = args.next().expect("arity checked");
    match array {
        Object::Array(elements) => {
            let mut extended = elements.as_ref().clone();
            extended.push(element);
            Ok(Object::Array(Rc::new(extended)))
        }
        other => Err(RuntimeError::ExpectedArrayArgument {
            name: "push",
            actual: other.kind(),
        }),
    }
}

/// Writes each argument's display form to the console, one per line.
fn puts(console: &mut dyn Console, args: Vec<Object>) -> Result<Object, RuntimeError> {
    for arg in args {
        console.writeln(&arg.to_string());
    }
    Ok(NULL)
}
