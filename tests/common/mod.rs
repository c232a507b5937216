use exprcc::{Insn, Reg};

/// Minimal model of the target: the registers the emitter touches and a
/// word stack. `rdx` is only written by `cqo`.
#[derive(Debug, Default)]
pub struct Machine {
  pub rax: i64,
  pub rdi: i64,
  pub rdx: i64,
  pub stack: Vec<i64>,
}

impl Machine {
  fn reg(&mut self, reg: Reg) -> &mut i64 {
    match reg {
      Reg::Rax => &mut self.rax,
      Reg::Rdi => &mut self.rdi,
    }
  }

  fn read(&mut self, reg: Reg) -> i64 {
    *self.reg(reg)
  }

  pub fn step(&mut self, insn: Insn) {
    match insn {
      Insn::Mov(dst, value) => *self.reg(dst) = value,
      Insn::PushReg(reg) => {
        let value = self.read(reg);
        self.stack.push(value);
      }
      Insn::Pop(reg) => {
        let value = self.stack.pop().expect("pop from empty stack");
        *self.reg(reg) = value;
      }
      Insn::Add(dst, src) => {
        let rhs = self.read(src);
        let lhs = self.reg(dst);
        *lhs = lhs.wrapping_add(rhs);
      }
      Insn::Sub(dst, src) => {
        let rhs = self.read(src);
        let lhs = self.reg(dst);
        *lhs = lhs.wrapping_sub(rhs);
      }
      Insn::Imul(dst, src) => {
        let rhs = self.read(src);
        let lhs = self.reg(dst);
        *lhs = lhs.wrapping_mul(rhs);
      }
      Insn::Cqo => self.rdx = if self.rax < 0 { -1 } else { 0 },
      Insn::Idiv(src) => {
        // Dividend is rdx:rax.
        let dividend = (i128::from(self.rdx) << 64) | i128::from(self.rax as u64);
        let divisor = i128::from(self.read(src));
        self.rdx = (dividend % divisor) as i64;
        self.rax = (dividend / divisor) as i64;
      }
      Insn::Ret => {}
    }
  }
}

/// Compile `expr`, run it followed by the `pop rax` epilogue and return the
/// accumulator. Panics if the stack is left unbalanced.
pub fn eval(expr: &str) -> i64 {
  let code = exprcc::compile(expr).unwrap_or_else(|err| panic!("{err}"));
  run(code)
}

/// Execute an already lowered instruction stream; see [`eval`].
pub fn run(code: Vec<Insn>) -> i64 {
  let mut machine = Machine::default();
  for insn in code {
    machine.step(insn);
  }
  assert_eq!(machine.stack.len(), 1, "expression must leave one value");
  machine.step(Insn::Pop(Reg::Rax));
  assert!(machine.stack.is_empty());
  machine.rax
}
