use super::opcode::{Op, Target};
use super::var::Var;
use super::Address;

/// ## Relocation
///
/// Rewrite every pending label target in the freshly compiled range
/// into an absolute instruction index, read from the label's cell in
/// the shared store. Label definition always completes before this
/// pass runs, so no further validation happens here.
pub fn link(ops: &mut [Op], vars: &Var) {
    for op in ops {
        let target = match op {
            Op::Jump(target) => target,
            Op::JumpIf(_, _, _, target) => target,
            Op::Loop(_, _, target) => target,
            _ => continue,
        };
        if let Target::Sym(sym) = target {
            let addr = vars.get(*sym).max(0) as Address;
            *target = Target::Addr(addr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::SymbolTable;
    use crate::mach::Rel;

    #[test]
    fn test_pending_targets_become_addresses() {
        let mut syms = SymbolTable::new();
        let label = syms.intern("top").unwrap();
        let mut vars = Var::new();
        vars.sync(&syms);
        vars.set(label, 7);
        let mut ops = vec![
            Op::Jump(Target::Sym(label)),
            Op::JumpIf(Rel::Lt, 0, 0, Target::Sym(label)),
            Op::End,
        ];
        link(&mut ops, &vars);
        assert_eq!(ops[0], Op::Jump(Target::Addr(7)));
        assert_eq!(ops[1], Op::JumpIf(Rel::Lt, 0, 0, Target::Addr(7)));
    }
}
