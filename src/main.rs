use std::io;

fn main() -> io::Result<()> {
    octodis::cli::main()
}
