//! Writeback (WB).

use crate::history::{RegClass, RegisterChange};
use crate::pipeline::engine::PipelinedVm;

/// Writeback stage.
///
/// Commits the MEM/WB result to the destination register when the write
/// enable is set and the destination is not `x0`. A change entry lands in
/// the step's delta only when the value actually changed. This is also where
/// an instruction counts as retired.
pub(crate) fn writeback_stage(vm: &mut PipelinedVm) {
    let mem_wb = &vm.mem_wb;
    if !mem_wb.reg_write || mem_wb.rd == 0 {
        return;
    }

    let value = if mem_wb.mem_to_reg {
        mem_wb.memory_data
    } else {
        mem_wb.alu_result
    };
    let rd = mem_wb.rd;

    let old_value = vm.registers.read_gpr(rd);
    if old_value != value {
        vm.current_delta.register_changes.push(RegisterChange {
            index: rd,
            class: RegClass::Gpr,
            old_value,
            new_value: value,
        });
    }

    vm.registers.write_gpr(rd, value);
    vm.stats.instructions_retired += 1;
}
