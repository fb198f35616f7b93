//! Memory access (MEM).

use crate::history::MemoryChange;
use crate::pipeline::engine::PipelinedVm;
use crate::pipeline::latches::MemWbLatch;

/// How many bytes a store touches.
const STORE_BYTES: u64 = 8;

/// Memory stage.
///
/// Loads read a doubleword at the ALU-computed address into MEM/WB. Stores
/// snapshot the target range before writing and record a change entry in the
/// step's delta only when the write actually altered memory, keeping deltas
/// minimal.
pub(crate) fn memory_stage(vm: &mut PipelinedVm) {
    let ex_mem = vm.ex_mem.clone();
    let address = ex_mem.alu_result;

    let memory_data = if ex_mem.mem_read {
        vm.memory.read_double_word(address)
    } else {
        0
    };

    if ex_mem.mem_write {
        let old_bytes: Vec<u8> = (0..STORE_BYTES)
            .map(|i| vm.memory.read_byte(address.wrapping_add(i)))
            .collect();

        vm.memory.write_double_word(address, ex_mem.reg2_data);

        let new_bytes: Vec<u8> = (0..STORE_BYTES)
            .map(|i| vm.memory.read_byte(address.wrapping_add(i)))
            .collect();

        if old_bytes != new_bytes {
            vm.current_delta.memory_changes.push(MemoryChange {
                address,
                old_bytes,
                new_bytes,
            });
        }
    }

    vm.mem_wb = MemWbLatch {
        memory_data,
        alu_result: ex_mem.alu_result,
        rd: ex_mem.rd,
        reg_write: ex_mem.reg_write,
        mem_to_reg: ex_mem.mem_to_reg,
    };
}
