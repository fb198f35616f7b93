//! Instruction Fetch (IF).

use crate::isa;
use crate::pipeline::engine::PipelinedVm;
use crate::pipeline::latches::IfIdLatch;

/// Fetch stage.
///
/// Reads the word at the program counter into IF/ID and advances the counter.
/// Under prediction policies the policy may guess taken, in which case fetch
/// redirects to `pc + imm` immediately; the guess travels down the pipeline
/// and is checked against the resolved outcome in Execute.
///
/// Two situations leave the program counter alone:
/// * A decode stall this cycle: the held word must be fetched into decode
///   again, so nothing moves.
/// * The counter has run past the program extent: a bubble enters IF/ID and
///   the pipeline drains.
pub(crate) fn fetch_stage(vm: &mut PipelinedVm) {
    if vm.stall {
        return;
    }

    if vm.pc >= vm.program_end {
        vm.if_id.reset();
        return;
    }

    let pc = vm.pc;
    let instruction = vm.memory.read_word(pc);
    let pred_taken = vm.policy.predict(pc, instruction);

    vm.if_id = IfIdLatch {
        instruction,
        pc,
        pred_taken,
    };

    if pred_taken {
        vm.pc = pc.wrapping_add_signed(i64::from(isa::immediate(instruction)));
    } else {
        vm.pc = pc.wrapping_add(4);
    }
}
