use super::{Code, Opcode, Operand, Opr, Val};
use crate::error;
use crate::lang::Error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Value stack capacity. A program that outgrows it faults.
pub const STACK_MAX: usize = 500;

/// What the machine is doing when `execute` hands control back.
#[derive(Debug)]
pub enum Event {
    /// Cycle budget spent; call `execute` again.
    Running,
    /// The program finished or was interrupted.
    Stopped,
    /// Text for the output stream, in emission order.
    Print(String),
    /// A scan is blocked. Supply one line with `input`, then resume.
    Input,
    /// The run faulted; nothing further will execute.
    Errors(Vec<Error>),
}

/// ## Virtual machine
///
/// Executes a compiled instruction buffer against a fixed-capacity
/// value stack. A frame is a three-word header (static link, dynamic
/// link, return address) followed by local slots; non-local loads and
/// stores chase the static links, so scoping is lexical no matter how
/// the program was called. Register `p` returning to 0 after the
/// first step is the halt condition: the outermost return targets the
/// pre-zeroed header at the stack bottom.
pub struct Runtime {
    code: Code,
    s: Vec<Val>,
    p: usize,
    b: usize,
    t: usize,
    halted: bool,
    input: Option<String>,
}

impl Runtime {
    pub fn new(code: Code) -> Runtime {
        Runtime {
            code,
            s: vec![Val::Integer(0); STACK_MAX],
            p: 0,
            b: 0,
            t: 0,
            halted: false,
            input: None,
        }
    }

    /// Supply the line a pending `Event::Input` asked for.
    pub fn input(&mut self, line: &str) {
        self.input = Some(line.to_string());
    }

    /// Stop the program from outside (Ctrl-C and friends).
    pub fn interrupt(&mut self) {
        self.halted = true;
    }

    /// Run up to `cycles` instructions, or until something needs the
    /// caller's attention.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if self.halted {
            return Event::Stopped;
        }
        for _ in 0..cycles {
            match self.step() {
                Ok(Some(event)) => return event,
                Ok(None) => {
                    if self.p == 0 {
                        self.halted = true;
                        return Event::Stopped;
                    }
                }
                Err(error) => {
                    self.halted = true;
                    return Event::Errors(vec![error]);
                }
            }
        }
        Event::Running
    }

    fn step(&mut self) -> Result<Option<Event>> {
        let inst = match self.code.get(self.p) {
            Some(inst) => inst.clone(),
            None => return Err(error!(InternalError; "FETCH PAST END OF PROGRAM")),
        };
        self.p += 1;
        match inst.op {
            Opcode::Lit => {
                let n = number(&inst.a)?;
                self.push(Val::Integer(n))?;
            }
            Opcode::Lits => {
                let s = text(&inst.a)?;
                self.push(Val::Text(s))?;
            }
            Opcode::Lod | Opcode::Lods => {
                let slot = self.slot(inst.level, &inst.a)?;
                let val = self.s[slot].clone();
                self.push(val)?;
            }
            Opcode::Sto | Opcode::Stos => {
                let val = self.pop()?;
                let slot = self.slot(inst.level, &inst.a)?;
                self.s[slot] = val;
            }
            Opcode::Cal => {
                if self.t + 2 >= STACK_MAX {
                    return Err(error!(StackOverflow));
                }
                let base = self.base(inst.level)?;
                self.s[self.t] = Val::Integer(base as i32);
                self.s[self.t + 1] = Val::Integer(self.b as i32);
                self.s[self.t + 2] = Val::Integer(self.p as i32);
                self.b = self.t;
                self.p = number(&inst.a)? as usize;
            }
            Opcode::Int => {
                let n = number(&inst.a)? as usize;
                if self.t + n > STACK_MAX {
                    return Err(error!(StackOverflow));
                }
                self.t += n;
            }
            Opcode::Jmp => {
                self.p = number(&inst.a)? as usize;
            }
            Opcode::Jpc => {
                if int(self.pop()?)? == 0 {
                    self.p = number(&inst.a)? as usize;
                }
            }
            Opcode::Opr(opr) => return self.operation(opr),
        }
        Ok(None)
    }

    fn operation(&mut self, opr: Opr) -> Result<Option<Event>> {
        match opr {
            Opr::Return => {
                self.t = self.b;
                self.p = self.int_at(self.t + 2)? as usize;
                self.b = self.int_at(self.t + 1)? as usize;
            }
            Opr::Neg => {
                let n = int(self.pop()?)?;
                self.push(Val::Integer(n.wrapping_neg()))?;
            }
            Opr::Add => self.arith(i32::wrapping_add)?,
            Opr::Sub => self.arith(i32::wrapping_sub)?,
            Opr::Mul => self.arith(i32::wrapping_mul)?,
            Opr::Div => {
                let rhs = int(self.pop()?)?;
                let lhs = int(self.pop()?)?;
                if rhs == 0 {
                    return Err(error!(DivisionByZero));
                }
                self.push(Val::Integer(lhs.wrapping_div(rhs)))?;
            }
            Opr::Odd => {
                let n = int(self.pop()?)?;
                self.push(Val::Integer(n % 2))?;
            }
            Opr::Eq => self.compare(|l, r| l == r)?,
            Opr::NotEq => self.compare(|l, r| l != r)?,
            Opr::Lt => self.compare(|l, r| l < r)?,
            Opr::GtEq => self.compare(|l, r| l >= r)?,
            Opr::Gt => self.compare(|l, r| l > r)?,
            Opr::LtEq => self.compare(|l, r| l <= r)?,
            Opr::Print => {
                let val = self.pop()?;
                return Ok(Some(Event::Print(val.to_string())));
            }
            Opr::Newline => return Ok(Some(Event::Print("\n".to_string()))),
            Opr::Space => return Ok(Some(Event::Print(" ".to_string()))),
            Opr::Read => match self.input.take() {
                Some(line) => {
                    // Unparsable input deliberately leaves 0 behind
                    // and execution continues.
                    let n = line.trim().parse::<i32>().unwrap_or(0);
                    self.push(Val::Integer(n))?;
                }
                None => {
                    self.p -= 1;
                    return Ok(Some(Event::Input));
                }
            },
            Opr::ReadText => match self.input.take() {
                Some(line) => {
                    self.push(Val::Text(line.into()))?;
                }
                None => {
                    self.p -= 1;
                    return Ok(Some(Event::Input));
                }
            },
            Opr::Concat => {
                let rhs = txt(self.pop()?)?;
                let lhs = txt(self.pop()?)?;
                let mut s = lhs.to_string();
                s.push_str(&rhs);
                self.push(Val::Text(s.into()))?;
            }
            Opr::Repeat => {
                let count = int(self.pop()?)?;
                let lhs = txt(self.pop()?)?;
                let s = lhs.repeat(count.max(0) as usize);
                self.push(Val::Text(s.into()))?;
            }
        }
        Ok(None)
    }

    fn push(&mut self, val: Val) -> Result<()> {
        if self.t >= STACK_MAX {
            return Err(error!(StackOverflow));
        }
        self.s[self.t] = val;
        self.t += 1;
        Ok(())
    }

    fn pop(&mut self) -> Result<Val> {
        if self.t == 0 {
            return Err(error!(InternalError; "STACK UNDERFLOW"));
        }
        self.t -= 1;
        Ok(self.s[self.t].clone())
    }

    fn arith(&mut self, f: fn(i32, i32) -> i32) -> Result<()> {
        let rhs = int(self.pop()?)?;
        let lhs = int(self.pop()?)?;
        self.push(Val::Integer(f(lhs, rhs)))
    }

    fn compare(&mut self, f: fn(i32, i32) -> bool) -> Result<()> {
        let rhs = int(self.pop()?)?;
        let lhs = int(self.pop()?)?;
        self.push(Val::Integer(if f(lhs, rhs) { 1 } else { 0 }))
    }

    /// Frame base `level` lexical hops out, following static links.
    fn base(&self, level: usize) -> Result<usize> {
        let mut base = self.b;
        for _ in 0..level {
            base = self.int_at(base)? as usize;
        }
        Ok(base)
    }

    fn slot(&self, level: usize, a: &Operand) -> Result<usize> {
        let slot = self.base(level)? + number(a)? as usize;
        if slot >= STACK_MAX {
            return Err(error!(InternalError; "FRAME SLOT OUT OF RANGE"));
        }
        Ok(slot)
    }

    fn int_at(&self, slot: usize) -> Result<i32> {
        match self.s.get(slot) {
            Some(Val::Integer(n)) => Ok(*n),
            Some(Val::Text(_)) => Err(error!(TypeMismatch)),
            None => Err(error!(InternalError; "FRAME SLOT OUT OF RANGE")),
        }
    }
}

fn number(a: &Operand) -> Result<i32> {
    match a {
        Operand::Number(n) => Ok(*n),
        _ => Err(error!(InternalError; "MISSING NUMERIC OPERAND")),
    }
}

fn text(a: &Operand) -> Result<Rc<str>> {
    match a {
        Operand::Text(s) => Ok(s.clone()),
        _ => Err(error!(InternalError; "MISSING STRING OPERAND")),
    }
}

fn int(val: Val) -> Result<i32> {
    match val {
        Val::Integer(n) => Ok(n),
        Val::Text(_) => Err(error!(TypeMismatch)),
    }
}

fn txt(val: Val) -> Result<Rc<str>> {
    match val {
        Val::Text(s) => Ok(s),
        Val::Integer(_) => Err(error!(TypeMismatch)),
    }
}
