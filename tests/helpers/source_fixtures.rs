//! Common source fixtures for tests.

pub const HELLO: &str = r#"
with Text_IO;
procedure Hello is
begin
   Text_IO.Put_Line ("Hello");
end Hello;
"#;

pub const STACKS: &str = r#"
generic
   Size : POSITIVE := 100;
   type Item is private;
package Stacks is
   type Stack is limited private;
   Overflow, Underflow : exception;
   procedure Push (S : in out Stack; X : in Item);
   procedure Pop (S : in out Stack; X : out Item);
   function Depth (S : Stack) return NATURAL;
private
   type Item_Array is array (1 .. Size) of Item;
   type Stack is record
      Top   : NATURAL := 0;
      Items : Item_Array;
   end record;
end Stacks;

package body Stacks is
   procedure Push (S : in out Stack; X : in Item) is
   begin
      if S.Top = Size then
         raise Overflow;
      end if;
      S.Top := S.Top + 1;
      S.Items (S.Top) := X;
   end Push;

   procedure Pop (S : in out Stack; X : out Item) is
   begin
      if S.Top = 0 then
         raise Underflow;
      end if;
      X := S.Items (S.Top);
      S.Top := S.Top - 1;
   end Pop;

   function Depth (S : Stack) return NATURAL is
   begin
      return S.Top;
   end Depth;
end Stacks;

with Stacks;
procedure Use_Stacks is
   package Int_Stacks is new Stacks (Size => 10, Item => INTEGER);
   use Int_Stacks;
   S : Stack;
   V : INTEGER;
begin
   Push (S, 1);
   Pop (S, V);
exception
   when Overflow | Underflow => null;
end Use_Stacks;
"#;

pub const LISTS: &str = r#"
package Lists is
   type Node;
   type Link is access Node;
   type Node is record
      Value : INTEGER;
      Next  : Link;
   end record;

   function Length (L : Link) return NATURAL;
end Lists;

package body Lists is
   function Length (L : Link) return NATURAL is
      Count : NATURAL := 0;
      Cur   : Link := L;
   begin
      while Cur /= null loop
         Count := Count + 1;
         Cur := Cur.Next;
      end loop;
      return Count;
   end Length;
end Lists;
"#;

pub const SHAPES: &str = r#"
package Shapes is
   type Kind is (Circle, Square, Triangle);
   type Shape (K : Kind := Circle) is record
      X, Y : FLOAT;
      case K is
         when Circle =>
            Radius : FLOAT;
         when Square | Triangle =>
            Side : FLOAT;
      end case;
   end record;
   subtype Round is Shape (Circle);
   Unit_Circle : constant Round := (K => Circle, X => 0.0, Y => 0.0, Radius => 1.0);
end Shapes;
"#;

pub const MATRICES: &str = r#"
procedure Matrices is
   type Matrix is array (INTEGER range <>, INTEGER range <>) of FLOAT;
   subtype Square is Matrix (1 .. 3, 1 .. 3);
   M : Square := (others => (others => 0.0));
   Trace : FLOAT := 0.0;
begin
   Outer : for I in M'Range (1) loop
      for J in M'Range (2) loop
         if I = J then
            Trace := Trace + M (I, J);
         elsif Trace > 100.0 then
            exit Outer;
         end if;
      end loop;
   end loop Outer;
end Matrices;
"#;
