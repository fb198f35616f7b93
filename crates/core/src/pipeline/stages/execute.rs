//! Execute (EX).

use crate::alu::Alu;
use crate::isa;
use crate::pipeline::control;
use crate::pipeline::engine::PipelinedVm;
use crate::pipeline::latches::ExMemLatch;
use tracing::trace;

/// Execute stage.
///
/// Runs the ALU control unit on the word in ID/EX, selects the second
/// operand (rs2 or immediate), executes the operation, and fills EX/MEM.
///
/// Conditional branches resolve here, one stage after the wrong-path fetch.
/// The resolved direction is compared against the fetch-time prediction
/// carried in the latch; on a mismatch the front of the pipeline (IF/ID and
/// ID/EX) is flushed to bubbles and the program counter is redirected, so
/// exactly one wrong-path instruction is discarded. In non-prediction modes
/// the carried prediction is always not-taken, which reduces this to the
/// classic flush-on-taken behavior.
pub(crate) fn execute_stage(vm: &mut PipelinedVm) {
    let id_ex = vm.id_ex.clone();
    let ctrl = id_ex.ctrl;

    let operand_b = if ctrl.alu_src {
        i64::from(id_ex.imm) as u64
    } else {
        id_ex.reg2_data
    };

    let op = control::decode_alu(id_ex.instruction, ctrl.alu_hint);
    let (alu_result, _overflow) = Alu::execute(op, id_ex.reg1_data, operand_b);

    let mut branch_taken = false;
    let mut branch_target_pc = 0;

    if ctrl.branch {
        // The ALU control unit picked Sub for BEQ/BNE, Slt for BLT/BGE and
        // Sltu for BLTU/BGEU, so the direction falls out of the result.
        let funct3 = isa::funct3(id_ex.instruction);
        branch_taken = match funct3 {
            0b000 | 0b101 | 0b111 => alu_result == 0,
            _ => alu_result != 0,
        };
        branch_target_pc = id_ex.pc.wrapping_add_signed(i64::from(id_ex.imm));

        vm.stats.branches_resolved += 1;
        if branch_taken {
            vm.stats.branches_taken += 1;
        }
        vm.policy.train(id_ex.pc, branch_taken);

        if branch_taken != id_ex.pred_taken {
            vm.pc = if branch_taken {
                branch_target_pc
            } else {
                id_ex.pc.wrapping_add(4)
            };
            vm.if_id.reset();
            vm.id_ex.reset();
            vm.stats.branch_flushes += 1;
            trace!(pc = id_ex.pc, taken = branch_taken, "branch mispredict, pipeline flushed");
        }
    }

    vm.ex_mem = ExMemLatch {
        alu_result,
        reg2_data: id_ex.reg2_data,
        rd: id_ex.rd,
        branch_taken,
        branch_target_pc,
        reg_write: ctrl.reg_write,
        mem_to_reg: ctrl.mem_to_reg,
        mem_read: ctrl.mem_read,
        mem_write: ctrl.mem_write,
    };
}
