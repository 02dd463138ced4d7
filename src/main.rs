use growbuf::collections::contiguous::{Buffer, Text};

#[derive(Debug, Clone)]
struct MyZST;

impl Drop for MyZST {
    fn drop(&mut self) {
        println!("Dropped MyZST");
    }
}

fn main() {
    println!("\n[Buffer]\n");

    let mut buf = Buffer::<u8>::new();
    println!("{:?}", buf);

    for i in 1..=8 {
        buf.push(i);
        println!("{:?}", buf);
    }

    let copy = buf.clone();
    buf.clear();
    println!("cleared: {:?}, copy: {:?}", buf, copy);
    println!("{:?}", copy.at(8));

    println!("\n[Text]\n");

    let mut text = Text::from("Hello");
    text += ", world";
    println!("{text} -> {:?}", text.to_nul_terminated().map(|bytes| bytes.len()));

    println!("\nZST Testing\n");

    let mut buf = Buffer::<MyZST>::new();
    for _ in 0..3 {
        buf.push(MyZST);
    }
    println!("{:?}", buf);
}
