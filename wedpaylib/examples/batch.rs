use wedpaylib::{
    formats::{csv::Csv, text::Text},
    traits::{ReadFormat, WriteFormat},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: CSV target,amount -> payload по строке (stdin -> stdout)
    let mut b = Csv::read(std::io::BufReader::new(std::io::stdin()))?;
    b.generate();
    Text::write(std::io::stdout(), &b)?;
    Ok(())
}
