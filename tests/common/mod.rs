#![allow(dead_code)]
use intcode::mach::{Runtime, Word};

pub const QUINE: &str = "109,1,204,-1,1001,100,1,100,1008,100,16,101,1006,101,0,99";

pub const COMPARE_TO_8: &str = "3,21,1008,21,8,20,1005,20,22,107,8,21,20,1006,20,31,\
                                1106,0,36,98,0,0,1002,21,125,20,4,20,1105,1,46,104,\
                                999,1105,1,46,1101,1000,1,20,4,20,1105,1,46,98,99";

pub fn machine(program: &str) -> Runtime {
    program.parse().unwrap()
}

pub fn run(program: &str, inputs: &[Word]) -> Vec<Word> {
    machine(program)
        .with_inputs(inputs.iter().copied())
        .run()
        .unwrap()
}

/// Pulls outputs one at a time until the machine halts.
pub fn drain(runtime: &mut Runtime) -> Vec<Word> {
    let mut outputs = vec![];
    while let Some(value) = runtime.run_until_output().unwrap() {
        outputs.push(value);
    }
    outputs
}

/// Chains one machine per phase, each feeding the next, and returns the
/// last value the final machine produced before halting.
pub fn amplify(program: &str, phases: &[Word]) -> Word {
    let mut machines: Vec<Runtime> = phases
        .iter()
        .map(|phase| machine(program).with_inputs(vec![*phase]))
        .collect();
    let last = machines.len() - 1;
    let mut signal = 0;
    let mut result = None;
    let mut current = 0;
    loop {
        machines[current].push_input(signal);
        match machines[current].run_until_output().unwrap() {
            Some(value) => {
                signal = value;
                if current == last {
                    result = Some(value);
                }
            }
            None if current == last => break,
            None => {}
        }
        current = (current + 1) % machines.len();
    }
    result.unwrap()
}
