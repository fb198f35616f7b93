//! Instruction Decode (ID).

use crate::isa;
use crate::pipeline::control;
use crate::pipeline::engine::PipelinedVm;
use crate::pipeline::latches::IdExLatch;
use tracing::trace;

/// Decode stage.
///
/// Extracts the register indices and immediate from the word in IF/ID, runs
/// the main control unit, and fills ID/EX. Source operands come from the
/// register file, resolved through the hazard policy so forwarding modes can
/// bypass newer in-flight results.
///
/// When the policy demands a stall, a bubble enters ID/EX instead, IF/ID is
/// left untouched, and the stall flag tells fetch to hold the program
/// counter so the same word is decoded again next cycle.
pub(crate) fn decode_stage(vm: &mut PipelinedVm) {
    let instruction = vm.if_id.instruction;
    let pc = vm.if_id.pc;
    let pred_taken = vm.if_id.pred_taken;

    let rs1 = isa::rs1(instruction);
    // Index 0 for formats whose bits 20-24 are immediate, so hazard checks
    // never see a phantom rs2 dependency.
    let rs2 = if isa::reads_rs2(instruction) {
        isa::rs2(instruction)
    } else {
        0
    };
    let rd = isa::rd(instruction);

    if vm.policy.should_stall(rs1, rs2, &vm.ex_mem, &vm.mem_wb) {
        trace!(pc, "decode stalled");
        vm.stall = true;
        vm.id_ex.reset();
        vm.stats.stall_cycles += 1;
        return;
    }

    let ctrl = control::decode_main(instruction);

    let reg1_data = vm
        .policy
        .forward(rs1, vm.registers.read_gpr(rs1), &vm.ex_mem, &vm.mem_wb);
    let reg2_data = vm
        .policy
        .forward(rs2, vm.registers.read_gpr(rs2), &vm.ex_mem, &vm.mem_wb);

    vm.id_ex = IdExLatch {
        pc,
        instruction,
        reg1_data,
        reg2_data,
        imm: isa::immediate(instruction),
        rs1,
        rs2,
        rd,
        ctrl,
        pred_taken,
    };
}
