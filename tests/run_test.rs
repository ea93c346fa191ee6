mod common;
use common::*;

#[test]
fn test_add_doubles_cell_zero() {
    let mut r = machine("1,0,0,0,99");
    assert!(r.run().unwrap().is_empty());
    assert_eq!(r.memory().image(), &[2, 0, 0, 0, 99]);
    assert!(r.is_halted());
}

#[test]
fn test_echo_input() {
    assert_eq!(run("3,0,4,0,99", &[7]), vec![7]);
}

#[test]
fn test_immediate_add() {
    let mut r = machine("1101,100,-1,4,0");
    r.run().unwrap();
    assert_eq!(r.read(4).unwrap(), 99);
}

#[test]
fn test_multiply_with_modes() {
    let mut r = machine("1002,4,3,4,33");
    r.run().unwrap();
    assert_eq!(r.memory().image(), &[1002, 4, 3, 4, 99]);
}

#[test]
fn test_position_mode_programs() {
    let cases: &[(&str, &[i64])] = &[
        ("1,9,10,3,2,3,11,0,99,30,40,50", &[3500, 9, 10, 70, 2, 3, 11, 0, 99, 30, 40, 50]),
        ("2,3,0,3,99", &[2, 3, 0, 6, 99]),
        ("2,4,4,5,99,0", &[2, 4, 4, 5, 99, 9801]),
        ("1,1,1,4,99,5,6,0,99", &[30, 1, 1, 4, 2, 5, 6, 0, 99]),
    ];
    for (program, expected) in cases {
        let mut r = machine(program);
        r.run().unwrap();
        assert_eq!(r.memory().image(), *expected, "{}", program);
    }
}

#[test]
fn test_patch_before_run() {
    // noun and verb patched into cells 1 and 2
    let mut r = machine("1,0,0,0,99,10,20");
    r.write(1, 5).unwrap();
    r.write(2, 6).unwrap();
    r.run().unwrap();
    assert_eq!(r.read(0).unwrap(), 30);
}

#[test]
fn test_rerun_from_start() {
    let mut r = machine("1001,0,1,0,99");
    r.run().unwrap();
    assert_eq!(r.read(0).unwrap(), 1002);
    r.write(0, 1001).unwrap();
    r.set_pos(0);
    r.run().unwrap();
    assert_eq!(r.read(0).unwrap(), 1002);
}

#[test]
fn test_comparisons() {
    let programs = [
        ("3,9,8,9,10,9,4,9,99,-1,8", [0, 1, 0]),
        ("3,3,1108,-1,8,3,4,3,99", [0, 1, 0]),
        ("3,9,7,9,10,9,4,9,99,-1,8", [1, 0, 0]),
        ("3,3,1107,-1,8,3,4,3,99", [1, 0, 0]),
    ];
    for (program, expected) in programs.iter() {
        for (input, want) in [7, 8, 9].iter().zip(expected.iter()) {
            assert_eq!(run(program, &[*input]), vec![*want], "{} <- {}", program, input);
        }
    }
}

#[test]
fn test_jumps() {
    for program in &[
        "3,12,6,12,15,1,13,14,13,4,13,99,-1,0,1,9",
        "3,3,1105,-1,9,1101,0,0,12,4,12,99,1",
    ] {
        assert_eq!(run(program, &[0]), vec![0]);
        assert_eq!(run(program, &[-3]), vec![1]);
    }
}

#[test]
fn test_compare_to_eight() {
    assert_eq!(run(COMPARE_TO_8, &[5]), vec![999]);
    assert_eq!(run(COMPARE_TO_8, &[8]), vec![1000]);
    assert_eq!(run(COMPARE_TO_8, &[11]), vec![1001]);
}

#[test]
fn test_quine() {
    let expected: Vec<i64> = intcode::lang::parse(QUINE).unwrap();
    assert_eq!(run(QUINE, &[]), expected);
}

#[test]
fn test_large_numbers() {
    assert_eq!(run("1102,34915192,34915192,7,4,7,99,0", &[]), vec![1219070632396864]);
    assert_eq!(run("104,1125899906842624,99", &[]), vec![1125899906842624]);
}

#[test]
fn test_self_modifying_halt() {
    // the add overwrites the following output instruction with a halt
    let mut r = machine("1101,98,1,4,4,0,99");
    assert!(r.run().unwrap().is_empty());
    assert_eq!(r.read(4).unwrap(), 99);
}

#[test]
fn test_self_modifying_opcode() {
    // add becomes multiply before it is reached
    let mut r = machine("1101,1100,2,4,1101,3,4,9,99,0");
    r.run().unwrap();
    assert_eq!(r.read(4).unwrap(), 1102);
    assert_eq!(r.read(9).unwrap(), 12);
}

#[test]
fn test_start_position() {
    let mut r = machine("104,1,104,2,99").with_pos(2);
    assert_eq!(r.run().unwrap(), vec![2]);
}
