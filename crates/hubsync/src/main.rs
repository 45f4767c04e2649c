use anyhow::Result;

fn main() -> Result<()> {
    hubsync::initialize_command_line()
}
