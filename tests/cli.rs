use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use partygif::{Color, shift_hue};

fn binary() -> &'static str {
    env!("CARGO_BIN_EXE_partygif")
}

struct Decoded {
    frames: Vec<gif::Frame<'static>>,
}

impl Decoded {
    fn palette(&self, index: usize) -> Vec<[u8; 3]> {
        let raw = self.frames[index].palette.as_ref().expect("local palette");
        raw.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
    }
}

const PALETTE: [u8; 12] = [200, 40, 40, 30, 140, 130, 90, 90, 90, 250, 210, 20];

fn make_gif(frames: usize, delay: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut bytes, 2, 2, &PALETTE).expect("encoder");
        encoder.set_repeat(gif::Repeat::Infinite).expect("repeat");
        for index in 0..frames {
            let mut frame = gif::Frame::default();
            frame.width = 2;
            frame.height = 2;
            frame.delay = delay;
            frame.dispose = gif::DisposalMethod::Keep;
            frame.buffer = Cow::Owned(vec![index as u8 % 4, 1, 2, 3]);
            encoder.write_frame(&frame).expect("frame");
        }
    }
    bytes
}

fn decode(bytes: &[u8]) -> Decoded {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(bytes).expect("output is a gif");
    let mut frames = Vec::new();
    while let Some(frame) = decoder.read_next_frame().expect("frame decodes") {
        frames.push(frame.clone());
    }
    Decoded { frames }
}

fn run_with_stdin(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(binary())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn partygif");

    {
        let mut stdin = child.stdin.take().expect("no stdin");
        stdin.write_all(input).expect("stdin write failed");
    }

    child.wait_with_output().expect("failed to read output")
}

fn run_files(dir: &Path, input: &[u8], args: &[&str]) -> (Output, Vec<u8>) {
    let in_path = dir.join("in.gif");
    let out_path = dir.join("out.gif");
    fs::write(&in_path, input).expect("write input");
    let output = Command::new(binary())
        .arg("--in")
        .arg(&in_path)
        .arg("--out")
        .arg(&out_path)
        .args(args)
        .output()
        .expect("failed to run partygif");
    let written = fs::read(&out_path).unwrap_or_default();
    (output, written)
}

fn expected_rgb(rgb: [u8; 3], offset: f64) -> [u8; 3] {
    shift_hue(offset, Color::from_rgb8(rgb[0], rgb[1], rgb[2])).to_rgb8()
}

#[test]
fn help_shows_usage() {
    let output = Command::new(binary())
        .arg("--help")
        .output()
        .expect("failed to run --help");
    assert!(output.status.success(), "non-zero exit: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: partygif"), "help missing usage block");
    assert!(stdout.contains("--cycles"));
}

#[test]
fn version_reports_number() {
    let output = Command::new(binary())
        .arg("--version")
        .output()
        .expect("failed to run --version");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "version output missing crate version"
    );
}

#[test]
fn static_frame_gets_default_delay() {
    let output = run_with_stdin(&[], &make_gif(1, 0));
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stderr.is_empty(), "unexpected stderr output");

    let decoded = decode(&output.stdout);
    assert_eq!(decoded.frames.len(), 1);
    assert_eq!(decoded.frames[0].delay, 10);
    assert_eq!(
        decoded.palette(0)[..4],
        [[200, 40, 40], [30, 140, 130], [90, 90, 90], [250, 210, 20]]
    );
}

#[test]
fn four_frames_rotate_by_quarter_turns() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (output, written) = run_files(dir.path(), &make_gif(4, 6), &[]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty());

    let decoded = decode(&written);
    assert_eq!(decoded.frames.len(), 4);
    for (index, frame) in decoded.frames.iter().enumerate() {
        assert_eq!(frame.delay, 6);
        let offset = 90.0 * index as f64;
        let palette = decoded.palette(index);
        for (entry, source) in PALETTE.chunks_exact(3).enumerate() {
            let source = [source[0], source[1], source[2]];
            assert_eq!(
                palette[entry],
                expected_rgb(source, offset),
                "frame {index} entry {entry}"
            );
        }
    }
    let turned = decoded.palette(2)[0];
    assert!(turned[2] > turned[0], "red should swing toward blue: {turned:?}");
}

#[test]
fn repeats_replay_with_clean_restarts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (output, written) = run_files(dir.path(), &make_gif(2, 4), &["--repeats", "3"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let decoded = decode(&written);
    assert_eq!(decoded.frames.len(), 6);
    for (index, frame) in decoded.frames.iter().enumerate() {
        let expected = if index % 2 == 1 {
            gif::DisposalMethod::Background
        } else {
            gif::DisposalMethod::Keep
        };
        assert_eq!(frame.dispose, expected, "frame {index}");
        assert_eq!(frame.delay, 4);
    }
    assert_eq!(decoded.frames[2].buffer, decoded.frames[0].buffer);
    assert_eq!(decoded.frames[5].buffer, decoded.frames[1].buffer);
}

#[test]
fn black_flag_tints_grays() {
    let mut bytes = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut bytes, 1, 1, &[]).expect("encoder");
        let mut frame = gif::Frame::default();
        frame.width = 1;
        frame.height = 1;
        frame.palette = Some(vec![60, 60, 60, 0, 0, 0]);
        frame.transparent = Some(1);
        frame.buffer = Cow::Owned(vec![0]);
        encoder.write_frame(&frame).expect("frame");
    }

    let output = run_with_stdin(&["--black"], &bytes);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let decoded = decode(&output.stdout);
    let palette = decoded.palette(0);
    assert_eq!(palette[0], expected_rgb([255, 60, 60], 0.0));
    assert_eq!(decoded.frames[0].transparent, Some(1));
}

#[test]
fn positional_arguments_fail() {
    let output = Command::new(binary())
        .arg("stray.gif")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run partygif");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.trim_end(),
        "partygif: error: does not take any non-flag arguments"
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_input_names_the_stage() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = Command::new(binary())
        .arg("--in")
        .arg(dir.path().join("nope.gif"))
        .output()
        .expect("failed to run partygif");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.starts_with("partygif: error: opening input file: opening file: "),
        "unexpected stderr: {stderr}"
    );
    assert_eq!(stderr.lines().count(), 1);
}

#[test]
fn gif_without_frames_is_rejected() {
    let mut bytes = Vec::new();
    {
        let encoder = gif::Encoder::new(&mut bytes, 2, 2, &PALETTE).expect("encoder");
        drop(encoder);
    }
    bytes.push(0x3b);

    let output = run_with_stdin(&[], &bytes);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.trim_end(),
        "partygif: error: decoding input file: no frames in input"
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn bad_flag_value_is_one_line() {
    let output = Command::new(binary())
        .args(["--cycles", "lots"])
        .stdin(Stdio::null())
        .output()
        .expect("failed to run partygif");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("partygif: error: "), "unexpected stderr: {stderr}");
    assert_eq!(stderr.lines().count(), 1);
}
