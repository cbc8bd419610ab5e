use assert_cmd::Command;

pub fn mdwiki_cmd() -> Command {
	let mut cmd = Command::cargo_bin("mdwiki").expect("mdwiki binary should build");
	cmd.env("NO_COLOR", "1");
	cmd
}
