//! Entry trampoline
//!
//! The first instructions the machine executes. The external linker script
//! places `.boot.entry` at byte offset 0 of the flat image, which the
//! firmware loads at `LOAD_BASE` and jumps to with no valid stack and no
//! guaranteed register state. In strict order: jump over any data embedded
//! ahead of the code, establish the stack, call the boot application, and
//! halt when it returns. The halt loop is the program's only terminal state.

use core::arch::global_asm;

// STACK_TOP is re-stated here because global_asm! const operands must be
// usable in a .code16 immediate; keep in sync with crate::layout::STACK_TOP.
global_asm!(
    r#"
    .section .boot.entry, "ax"
    .code16
    .global _entry
_entry:
    jmp     1f                  # never execute embedded data
    .ascii  "MNW0"              # image tag, skipped by the jump

1:
    cli
    xor     ax, ax
    mov     ds, ax
    mov     es, ax
    mov     ss, ax
    mov     sp, {stack_top}
    mov     bp, sp
    sti

    call    boot_main

2:  hlt                         # terminal state: nothing runs past here
    jmp     2b
    "#,
    stack_top = const crate::layout::STACK_TOP,
);

/// No unwind or trap infrastructure exists at this stage; a panic can only
/// park the machine the same way a completed boot does.
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {
        // SAFETY: hlt with interrupts in whatever state the fault left them
        unsafe { core::arch::asm!("hlt", options(nomem, nostack)) };
    }
}
