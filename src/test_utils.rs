//! Fixtures shared by the test modules

/// Builds a minimal `.sxm` file: one header per call, frames appended in the given order.
pub fn sxm_bytes(
    points: usize,
    lines: usize,
    scan_dir: &str,
    channels: &[(&str, &str)],
    frames: &[Vec<f32>],
) -> Vec<u8> {
    let mut text = String::new();
    text.push_str(":NANONIS_VERSION:\n2\n");
    text.push_str(":SCANIT_TYPE:\n              FLOAT            MSBFIRST\n");
    text.push_str(&format!(":SCAN_PIXELS:\n       {}       {}\n", points, lines));
    text.push_str(":SCAN_RANGE:\n           2.000000E+1           2.000000E+1\n");
    text.push_str(":SCAN_OFFSET:\n             1.500000E+0         -2.500000E+0\n");
    text.push_str(":SCAN_ANGLE:\n            3.000E+1\n");
    text.push_str(&format!(":SCAN_DIR:\n{}\n", scan_dir));
    text.push_str(":BIAS:\n5.000E-1\n");
    text.push_str(":Z-CONTROLLER:\n\tName\ton\tSetpoint\tP-gain\tI-gain\tT-const\n");
    text.push_str("\tlog Current\t1\t100 pA\t1.000E-12 m\t3.000E-9 m/s\t3.333E-4 s\n");
    text.push_str(":DATA_INFO:\n\tChannel\tName\tUnit\tDirection\tCalibration\tOffset\n");
    for (i, (name, direction)) in channels.iter().enumerate() {
        text.push_str(&format!(
            "\t{}\t{}\tm\t{}\t1.000E+0\t0.000E+0\n",
            i, name, direction
        ));
    }
    text.push('\n');
    text.push_str(":SCANIT_END:\n\n\n");

    let mut bytes = text.into_bytes();
    bytes.extend_from_slice(&[0x1a, 0x04]);
    for frame in frames {
        for value in frame {
            bytes.extend_from_slice(&value.to_be_bytes());
        }
    }
    bytes
}
