use assert_cmd::Command;

pub fn roletex_cmd() -> Command {
    let mut cmd = Command::cargo_bin("roletex").unwrap();
    cmd.env_remove("ROLETEX_ROOT");
    cmd
}
